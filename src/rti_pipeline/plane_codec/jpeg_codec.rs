//! JPEG plane codec built on `jpeg-encoder` and `jpeg-decoder`.
//!
//! Single-channel planes (luma, shared chroma) are written as grayscale
//! JPEGs and three-channel planes as RGB JPEGs. The decoder insists on
//! getting back the pixel format it wrote.

use jpeg_decoder::PixelFormat;
use jpeg_encoder::{ColorType, Encoder, EncodingError};
use tracing::trace;

use crate::rti_pipeline::common::error::{CodecError, FormatError, Result};
use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::plane_codec::codec::{validate_quality, PlaneCodec};

#[derive(Debug, Clone, Copy, Default)]
pub struct JpegPlaneCodec;

fn color_type(channels: usize) -> Result<ColorType> {
    match channels {
        1 => Ok(ColorType::Luma),
        3 => Ok(ColorType::Rgb),
        other => Err(CodecError::UnsupportedChannels(other).into()),
    }
}

fn jpeg_dimension(width: usize, height: usize) -> Result<(u16, u16)> {
    let invalid = || CodecError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid().into());
    }
    let w = u16::try_from(width).map_err(|_| invalid())?;
    let h = u16::try_from(height).map_err(|_| invalid())?;
    Ok((w, h))
}

impl PlaneCodec for JpegPlaneCodec {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn encode(&self, plane: &Plane, quality: u8) -> Result<Vec<u8>> {
        validate_quality(quality)?;
        let color_type = color_type(plane.channels)?;
        let (width, height) = jpeg_dimension(plane.width, plane.height)?;

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, quality);
        encoder
            .encode(&plane.data, width, height, color_type)
            .map_err(|e: EncodingError| CodecError::EncodeFailed(e.to_string()))?;

        trace!("JPEG q{} {} -> {} bytes", quality, plane.shape(), buffer.len());
        Ok(buffer)
    }

    fn decode(&self, blob: &[u8], width: usize, height: usize, channels: usize) -> Result<Plane> {
        let mut decoder = jpeg_decoder::Decoder::new(blob);
        let pixels = decoder
            .decode()
            .map_err(|e| FormatError::CorruptBlob(format!("JPEG decode failed: {}", e)))?;

        let info = decoder
            .info()
            .ok_or_else(|| FormatError::CorruptBlob("missing JPEG frame info".to_string()))?;

        let decoded_channels = match info.pixel_format {
            PixelFormat::L8 => 1,
            PixelFormat::RGB24 => 3,
            other => {
                return Err(FormatError::CorruptBlob(format!("unexpected pixel format {:?}", other)).into());
            }
        };

        if info.width as usize != width || info.height as usize != height || decoded_channels != channels {
            return Err(FormatError::CorruptBlob(format!(
                "decoded {}x{}x{}, expected {}x{}x{}",
                info.width, info.height, decoded_channels, width, height, channels
            ))
            .into());
        }

        Plane::from_vec(width, height, channels, pixels).ok_or_else(|| {
            FormatError::CorruptBlob("decoded sample count does not match frame size".to_string()).into()
        })
    }
}
