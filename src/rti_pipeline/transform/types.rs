//! Transform configuration and transform-domain types

use std::fmt;
use std::str::FromStr;

use crate::rti_pipeline::common::error::{FormatError, InvariantViolation, Result};
use crate::rti_pipeline::common::plane::Plane;

/// How coefficient planes are prepared for the plane codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMode {
    /// Every plane is encoded as-is.
    Direct,
    /// Per-plane luma plus one chroma pair averaged over all planes.
    #[default]
    ChromaShared,
}

impl TransformMode {
    /// Number of container segments for a dataset with `plane_count` planes.
    pub fn segment_count(&self, plane_count: usize) -> usize {
        match self {
            TransformMode::Direct => plane_count,
            TransformMode::ChromaShared => plane_count + 2,
        }
    }

    /// Segment classes in container order.
    pub fn segment_classes(&self, plane_count: usize) -> Vec<SegmentClass> {
        let mut classes = vec![SegmentClass::Primary; plane_count];
        if *self == TransformMode::ChromaShared {
            classes.extend([SegmentClass::Chroma, SegmentClass::Chroma]);
        }
        classes
    }

    /// Channels per encoded segment.
    pub fn segment_channels(&self, channel_count: usize) -> usize {
        match self {
            TransformMode::Direct => channel_count,
            TransformMode::ChromaShared => 1,
        }
    }

    /// Label used in experiment reports.
    pub fn method_name(&self) -> &'static str {
        match self {
            TransformMode::Direct => "JPEG",
            TransformMode::ChromaShared => "YCC",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Direct => write!(f, "direct"),
            TransformMode::ChromaShared => write!(f, "chroma-shared"),
        }
    }
}

impl FromStr for TransformMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" | "jpeg" => Ok(TransformMode::Direct),
            "chroma-shared" | "chroma" | "ycc" => Ok(TransformMode::ChromaShared),
            other => Err(format!("unknown transform mode {:?}", other)),
        }
    }
}

/// Rounding applied when the averaged chroma is stored back as `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromaRounding {
    /// Drop the fraction.
    #[default]
    Truncate,
    /// Round to nearest, halves going up.
    RoundHalfUp,
}

impl FromStr for ChromaRounding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(ChromaRounding::Truncate),
            "round" | "round-half-up" => Ok(ChromaRounding::RoundHalfUp),
            other => Err(format!("unknown chroma rounding {:?}", other)),
        }
    }
}

/// Which quality setting a segment is encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentClass {
    /// A coefficient plane (direct mode) or a luma plane.
    Primary,
    /// One of the two shared chroma planes.
    Chroma,
}

/// Shared blue- and red-difference planes of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedChroma {
    pub blue: Plane,
    pub red: Plane,
}

/// Output of the forward transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedPlanes {
    /// RGB planes (direct) or luma planes (chroma-shared), in plane order.
    pub primary: Vec<Plane>,
    pub chroma: Option<SharedChroma>,
}

impl TransformedPlanes {
    /// Flattens into container segment order: primary planes, then blue,
    /// then red.
    pub fn into_segments(self) -> Vec<Plane> {
        let mut segments = self.primary;
        if let Some(chroma) = self.chroma {
            segments.push(chroma.blue);
            segments.push(chroma.red);
        }
        segments
    }

    /// Rebuilds from segments in container order.
    pub fn from_segments(mode: TransformMode, plane_count: usize, mut segments: Vec<Plane>) -> Result<Self> {
        let expected = mode.segment_count(plane_count);
        if segments.len() != expected {
            return Err(FormatError::WrongBlobCount {
                expected,
                found: segments.len(),
            }
            .into());
        }

        match mode {
            TransformMode::Direct => Ok(Self {
                primary: segments,
                chroma: None,
            }),
            TransformMode::ChromaShared => {
                let (Some(red), Some(blue)) = (segments.pop(), segments.pop()) else {
                    return Err(InvariantViolation::CountMismatch {
                        what: "chroma segments",
                        expected: 2,
                        found: 0,
                    }
                    .into());
                };
                Ok(Self {
                    primary: segments,
                    chroma: Some(SharedChroma { blue, red }),
                })
            }
        }
    }
}
