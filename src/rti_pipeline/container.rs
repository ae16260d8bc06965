//! Compressed container module
//!
//! The container holds the scale and bias floats of a dataset followed by
//! one length-prefixed blob per transform-domain plane:
//!
//! ```text
//! <plane_count f32 LE scales>
//! <plane_count f32 LE biases>
//! repeat { i32 LE length; length bytes }
//! ```
//!
//! The segment count is implied by the configured transform mode and is not
//! stored in the file.

mod codec;
mod format;
pub mod types;


pub use codec::ContainerCodec;
pub use format::{read_container, ContainerWriter, WriterState};
pub use types::{CodecConfig, CodecConfigBuilder, CompressedContainer};
