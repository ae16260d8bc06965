//! Plane codec module
//!
//! Adapters that turn a single byte matrix into an opaque blob and back.
//! JPEG is the real codec; the stored codec keeps samples verbatim and
//! serves as a lossless stand-in.

mod codec;
mod jpeg_codec;
mod stored_codec;


pub use codec::{validate_quality, PlaneCodec, MAX_QUALITY, MIN_QUALITY};
pub use jpeg_codec::JpegPlaneCodec;
pub use stored_codec::StoredPlaneCodec;
