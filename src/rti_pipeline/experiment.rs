//! Experiment driver module
//!
//! Sweeps codec settings over one RTI dataset: every run compresses and
//! decompresses the dataset, renders both the original and the
//! reconstruction under the same light, and measures how far apart the two
//! renderings are. Rendering and measuring are delegated to external tools
//! behind the [`Renderer`] and [`SimilarityMeter`] traits.

mod renderer;
mod report;
mod runner;
mod similarity;
pub mod types;


pub use renderer::{NodeRenderer, Renderer};
pub use report::{write_table, REPORT_HEADER};
pub use runner::ExperimentRunner;
pub use similarity::{parse_leading_number, ExternalToolMeter, SimilarityMeter};
pub use types::{
    ExperimentConfig, ExperimentConfigBuilder, LightDirection, RunResult, Similarity, SweepPoint, DEFAULT_GRID,
};
