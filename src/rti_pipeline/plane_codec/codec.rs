use crate::rti_pipeline::common::error::{CodecError, Result};
use crate::rti_pipeline::common::plane::Plane;

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Encodes one plane into a self-contained blob and decodes it back.
///
/// Implementations must keep the channel count: a single-channel plane is
/// encoded as a single-channel image.
pub trait PlaneCodec: Send + Sync {
    fn name(&self) -> &'static str;

    fn encode(&self, plane: &Plane, quality: u8) -> Result<Vec<u8>>;

    /// Fails with `FormatError::CorruptBlob` when the blob cannot be parsed
    /// or does not decode to `width × height × channels`.
    fn decode(&self, blob: &[u8], width: usize, height: usize, channels: usize) -> Result<Plane>;
}

pub fn validate_quality(quality: u8) -> Result<()> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(CodecError::InvalidQuality(quality).into());
    }
    Ok(())
}
