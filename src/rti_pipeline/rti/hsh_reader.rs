//! Reader for HSH/PTM-style RTI coefficient files.
//!
//! Layout:
//!
//! ```text
//! #<comment lines, any number, anywhere in the header>
//! 3
//! <width> <height> <channel_count>
//! <plane_count> <coefficient_type> <coefficient_size>
//! <plane_count f32 LE scales><plane_count f32 LE biases>
//! <coefficient body, see `layout`>
//! ```

use tracing::debug;

use crate::rti_pipeline::common::binary::split_f32_block;
use crate::rti_pipeline::common::error::{FormatError, Result};
use crate::rti_pipeline::rti::header::HeaderCursor;
use crate::rti_pipeline::rti::layout::split_body;
use crate::rti_pipeline::rti::reader::RtiReader;
use crate::rti_pipeline::rti::types::{RtiDataset, RtiShape, QUANTIZED_LINEAR, RTI_MAGIC};

pub struct HshRtiReader;

fn positive(value: i64, line: &'static str, field: &str) -> Result<usize> {
    if value <= 0 {
        return Err(FormatError::MalformedHeader {
            line,
            reason: format!("{} must be positive, found {}", field, value),
        }
        .into());
    }
    usize::try_from(value).map_err(|_| {
        FormatError::MalformedHeader {
            line,
            reason: format!("{} {} is too large", field, value),
        }
        .into()
    })
}

impl RtiReader for HshRtiReader {
    /// Parses an RTI file held in memory.
    ///
    /// Bytes past the coefficient body are ignored.
    fn read_rti(&self, data: &[u8]) -> Result<RtiDataset> {
        debug!("Parsing RTI file, {} bytes", data.len());

        let mut header = HeaderCursor::new(data);

        let magic = header.expect_line("magic")?;
        if magic != [RTI_MAGIC] {
            return Err(FormatError::BadMagic(magic.join(" ")).into());
        }

        let [width, height, channel_count] = header.expect_triple("dimension")?;
        let [plane_count, coefficient_type, coefficient_size] = header.expect_triple("coefficient")?;

        if coefficient_type != QUANTIZED_LINEAR {
            return Err(FormatError::UnsupportedCoefficientType(coefficient_type).into());
        }

        let shape = RtiShape::new(
            positive(width, "dimension", "width")?,
            positive(height, "dimension", "height")?,
            positive(channel_count, "dimension", "channel count")?,
            positive(plane_count, "coefficient", "plane count")?,
        );
        let coefficient_size = u32::try_from(coefficient_size).map_err(|_| FormatError::MalformedHeader {
            line: "coefficient",
            reason: format!("coefficient size {} out of range", coefficient_size),
        })?;

        debug!("RTI header: {}, coefficient size {}", shape, coefficient_size);

        let needed = shape
            .width
            .checked_mul(shape.height)
            .and_then(|v| v.checked_mul(shape.channel_count))
            .and_then(|v| v.checked_mul(shape.plane_count))
            .ok_or_else(|| FormatError::MalformedHeader {
                line: "dimension",
                reason: format!("{} is too large", shape),
            })?;

        let (scales, rest) = split_f32_block(header.remaining(), shape.plane_count, "scales")?;
        let (biases, body) = split_f32_block(rest, shape.plane_count, "biases")?;
        if body.len() < needed {
            return Err(FormatError::Truncated {
                what: "coefficient body",
                needed,
                available: body.len(),
            }
            .into());
        }
        if body.len() > needed {
            debug!("Ignoring {} trailing bytes", body.len() - needed);
        }

        let planes = split_body(&body[..needed], &shape);

        Ok(RtiDataset {
            shape,
            coefficient_size,
            scales,
            biases,
            planes,
        })
    }
}
