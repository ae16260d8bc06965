//! Common utilities module
//!
//! This module contains the error taxonomy, the plane matrix type and the
//! timing helpers shared across the RTI pipeline.

pub mod binary;
pub mod error;
pub mod plane;
pub mod timing;


pub use error::{CodecError, FormatError, InvariantViolation, Result, RtiError};
pub use plane::Plane;
pub use timing::{PipelineTimings, Stage};
