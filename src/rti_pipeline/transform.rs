//! Color-plane transform module
//!
//! Converts coefficient planes into the planes that actually get encoded,
//! and back. Direct mode is the identity; chroma-shared mode keeps a luma
//! plane per coefficient plane and one averaged chroma pair per dataset.

mod color_transform;
pub mod chroma;
pub mod types;
pub mod ycbcr;


pub use chroma::ChromaAccumulator;
pub use color_transform::ColorPlaneTransform;
pub use types::{ChromaRounding, SegmentClass, SharedChroma, TransformMode, TransformedPlanes};
