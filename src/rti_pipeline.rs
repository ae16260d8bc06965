//! RTI compression pipeline module
//!
//! This module provides a structured approach to RTI coefficient
//! compression, with separate modules for RTI file IO, the color-plane
//! transform, per-plane codecs, the compressed container and the file-level
//! and experiment orchestration built on top of them.

pub mod common;
pub mod container;
pub mod conversions;
pub mod experiment;
pub mod plane_codec;
pub mod rti;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use common::{
    CodecError,
    FormatError,
    InvariantViolation,
    PipelineTimings,
    Stage,
    Plane,
    Result,
    RtiError,
};

pub use rti::{
    HshRtiReader,
    HshRtiWriter,
    RtiDataset,
    RtiReader,
    RtiShape,
    RtiWriter,
};

pub use transform::{
    ChromaRounding,
    ColorPlaneTransform,
    TransformMode,
};

pub use plane_codec::{
    JpegPlaneCodec,
    PlaneCodec,
    StoredPlaneCodec,
};

pub use container::{
    CodecConfig,
    CodecConfigBuilder,
    ContainerCodec,
};

pub use conversions::RtiContainerPipeline;

pub use experiment::{
    ExperimentConfig,
    ExperimentRunner,
    LightDirection,
    RunResult,
    SweepPoint,
};
