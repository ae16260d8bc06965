//! Lossy compression of RTI (Reflectance Transformation Imaging) coefficient
//! planes into a compact container, and the experiment driver that measures
//! reconstruction quality.

pub mod logger;
pub mod rti_pipeline;
