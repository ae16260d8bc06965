use crate::rti_pipeline::common::error::{FormatError, Result};
use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::plane_codec::codec::{validate_quality, PlaneCodec};

/// Lossless codec that stores the samples verbatim. Quality is validated
/// but otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredPlaneCodec;

impl PlaneCodec for StoredPlaneCodec {
    fn name(&self) -> &'static str {
        "stored"
    }

    fn encode(&self, plane: &Plane, quality: u8) -> Result<Vec<u8>> {
        validate_quality(quality)?;
        Ok(plane.data.clone())
    }

    fn decode(&self, blob: &[u8], width: usize, height: usize, channels: usize) -> Result<Plane> {
        Plane::from_vec(width, height, channels, blob.to_vec()).ok_or_else(|| {
            FormatError::CorruptBlob(format!(
                "stored blob has {} bytes, expected {}",
                blob.len(),
                width * height * channels
            ))
            .into()
        })
    }
}
