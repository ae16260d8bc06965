//! RTI dataset types

use std::fmt;

use crate::rti_pipeline::common::error::{InvariantViolation, Result};
use crate::rti_pipeline::common::plane::Plane;

/// Token that must make up the first non-comment header line.
pub const RTI_MAGIC: &str = "3";

/// Coefficient type tag for quantized linear coefficients, the only one supported.
pub const QUANTIZED_LINEAR: i64 = 2;

/// Dimensions of an RTI dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RtiShape {
    pub width: usize,
    pub height: usize,
    pub channel_count: usize,
    pub plane_count: usize,
}

impl RtiShape {
    pub fn new(width: usize, height: usize, channel_count: usize, plane_count: usize) -> Self {
        Self {
            width,
            height,
            channel_count,
            plane_count,
        }
    }

    /// Sample count of a single plane.
    pub fn plane_len(&self) -> usize {
        self.width * self.height * self.channel_count
    }

    /// Byte count of the coefficient body.
    pub fn body_len(&self) -> usize {
        self.plane_len() * self.plane_count
    }
}

impl Default for RtiShape {
    /// Shape of the vase dataset the experiments were run against.
    fn default() -> Self {
        Self::new(320, 470, 3, 9)
    }
}

impl fmt::Display for RtiShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{} ({} planes)",
            self.width, self.height, self.channel_count, self.plane_count
        )
    }
}

/// A decoded RTI coefficient file.
///
/// `scales` and `biases` are the per-plane dequantization parameters
/// (`value = byte * scale + bias`); they are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RtiDataset {
    pub shape: RtiShape,
    /// Bytes per coefficient as declared in the header.
    pub coefficient_size: u32,
    pub scales: Vec<f32>,
    pub biases: Vec<f32>,
    pub planes: Vec<Plane>,
}

impl RtiDataset {
    /// Checks the plane/scale/bias counts and that every plane has the
    /// dataset's dimensions.
    pub fn validate(&self) -> Result<()> {
        let n = self.shape.plane_count;
        for (what, found) in [
            ("scales", self.scales.len()),
            ("biases", self.biases.len()),
            ("planes", self.planes.len()),
        ] {
            if found != n {
                return Err(InvariantViolation::CountMismatch {
                    what,
                    expected: n,
                    found,
                }
                .into());
            }
        }

        let expected = Plane::new(self.shape.width, self.shape.height, self.shape.channel_count);
        for (index, plane) in self.planes.iter().enumerate() {
            if !plane.same_shape(&expected) || plane.data.len() != self.shape.plane_len() {
                return Err(InvariantViolation::PlaneDimensionMismatch {
                    index,
                    expected: expected.shape(),
                    found: plane.shape(),
                }
                .into());
            }
        }
        Ok(())
    }
}
