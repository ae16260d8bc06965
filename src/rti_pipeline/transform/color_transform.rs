use tracing::debug;

use crate::rti_pipeline::common::error::{InvariantViolation, Result};
use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::transform::chroma::ChromaAccumulator;
use crate::rti_pipeline::transform::types::{ChromaRounding, SharedChroma, TransformMode, TransformedPlanes};
use crate::rti_pipeline::transform::ycbcr::{merge_ycbcr, split_ycbcr};

/// Forward and inverse color-plane transform for one mode.
#[derive(Debug, Clone, Copy)]
pub struct ColorPlaneTransform {
    mode: TransformMode,
    rounding: ChromaRounding,
}

fn check_same_shape(planes: &[Plane], reference: &Plane) -> Result<()> {
    for (index, plane) in planes.iter().enumerate() {
        if !plane.same_shape(reference) {
            return Err(InvariantViolation::PlaneDimensionMismatch {
                index,
                expected: reference.shape(),
                found: plane.shape(),
            }
            .into());
        }
    }
    Ok(())
}

impl ColorPlaneTransform {
    pub fn new(mode: TransformMode, rounding: ChromaRounding) -> Self {
        Self { mode, rounding }
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn forward(&self, planes: &[Plane]) -> Result<TransformedPlanes> {
        let Some(first) = planes.first() else {
            return Err(InvariantViolation::CountMismatch {
                what: "planes",
                expected: 1,
                found: 0,
            }
            .into());
        };
        check_same_shape(planes, first)?;

        match self.mode {
            TransformMode::Direct => Ok(TransformedPlanes {
                primary: planes.to_vec(),
                chroma: None,
            }),
            TransformMode::ChromaShared => {
                if first.channels != 3 {
                    return Err(InvariantViolation::ChromaNeedsRgb(first.channels).into());
                }

                let mut luma = Vec::with_capacity(planes.len());
                let mut blue = ChromaAccumulator::new(first.width, first.height);
                let mut red = ChromaAccumulator::new(first.width, first.height);

                for plane in planes {
                    let [y, cb, cr] = split_ycbcr(plane);
                    luma.push(y);
                    blue.add(&cb);
                    red.add(&cr);
                }

                debug!(
                    "Averaged chroma over {} planes ({:?})",
                    blue.count(),
                    self.rounding
                );

                Ok(TransformedPlanes {
                    primary: luma,
                    chroma: Some(SharedChroma {
                        blue: blue.finish(self.rounding),
                        red: red.finish(self.rounding),
                    }),
                })
            }
        }
    }

    /// Reattaches the shared chroma to every luma plane in chroma-shared
    /// mode; returns the planes unchanged in direct mode.
    pub fn inverse(&self, transformed: TransformedPlanes) -> Result<Vec<Plane>> {
        let TransformedPlanes { primary, chroma } = transformed;

        match (self.mode, chroma) {
            (TransformMode::Direct, None) => Ok(primary),
            (TransformMode::Direct, Some(_)) => Err(InvariantViolation::CountMismatch {
                what: "chroma segments",
                expected: 0,
                found: 2,
            }
            .into()),
            (TransformMode::ChromaShared, None) => Err(InvariantViolation::CountMismatch {
                what: "chroma segments",
                expected: 2,
                found: 0,
            }
            .into()),
            (TransformMode::ChromaShared, Some(SharedChroma { blue, red })) => {
                if blue.channels != 1 {
                    return Err(InvariantViolation::PlaneDimensionMismatch {
                        index: primary.len(),
                        expected: format!("{}x{}x1", blue.width, blue.height),
                        found: blue.shape(),
                    }
                    .into());
                }
                check_same_shape(&primary, &blue)?;
                check_same_shape(std::slice::from_ref(&red), &blue)?;

                Ok(primary
                    .iter()
                    .map(|luma| merge_ycbcr(luma, &blue, &red))
                    .collect())
            }
        }
    }
}
