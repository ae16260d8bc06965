//! Container codec configuration and container types

use crate::rti_pipeline::rti::RtiShape;
use crate::rti_pipeline::transform::{ChromaRounding, SegmentClass, TransformMode};

/// Everything the container codec needs to know about a dataset that is
/// not stored in the container itself.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Dataset dimensions.
    pub shape: RtiShape,
    /// Plane preparation before encoding.
    pub mode: TransformMode,
    /// Quality for RGB planes (direct) or luma planes (chroma-shared).
    pub primary_quality: u8,
    /// Quality for the shared chroma planes.
    pub chroma_quality: u8,
    pub chroma_rounding: ChromaRounding,
    /// Coefficient size written into reconstructed RTI headers.
    pub coefficient_size: u32,
    /// Encode and decode segments on the rayon pool.
    pub parallel: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            shape: RtiShape::default(),
            mode: TransformMode::ChromaShared,
            primary_quality: 30,
            chroma_quality: 30,
            chroma_rounding: ChromaRounding::Truncate,
            coefficient_size: 1,
            parallel: true,
        }
    }
}

impl CodecConfig {
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    pub fn quality_for(&self, class: SegmentClass) -> u8 {
        match class {
            SegmentClass::Primary => self.primary_quality,
            SegmentClass::Chroma => self.chroma_quality,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.mode.segment_count(self.shape.plane_count)
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    shape: Option<RtiShape>,
    mode: Option<TransformMode>,
    primary_quality: Option<u8>,
    chroma_quality: Option<u8>,
    chroma_rounding: Option<ChromaRounding>,
    coefficient_size: Option<u32>,
    parallel: Option<bool>,
}

impl CodecConfigBuilder {
    pub fn shape(mut self, shape: RtiShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn mode(mut self, mode: TransformMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn primary_quality(mut self, quality: u8) -> Self {
        self.primary_quality = Some(quality);
        self
    }

    pub fn chroma_quality(mut self, quality: u8) -> Self {
        self.chroma_quality = Some(quality);
        self
    }

    /// Sets both segment qualities.
    pub fn quality(self, quality: u8) -> Self {
        self.primary_quality(quality).chroma_quality(quality)
    }

    pub fn chroma_rounding(mut self, rounding: ChromaRounding) -> Self {
        self.chroma_rounding = Some(rounding);
        self
    }

    pub fn coefficient_size(mut self, size: u32) -> Self {
        self.coefficient_size = Some(size);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> CodecConfig {
        let default = CodecConfig::default();
        CodecConfig {
            shape: self.shape.unwrap_or(default.shape),
            mode: self.mode.unwrap_or(default.mode),
            primary_quality: self.primary_quality.unwrap_or(default.primary_quality),
            chroma_quality: self.chroma_quality.unwrap_or(default.chroma_quality),
            chroma_rounding: self.chroma_rounding.unwrap_or(default.chroma_rounding),
            coefficient_size: self.coefficient_size.unwrap_or(default.coefficient_size),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}

/// A parsed container: scale/bias floats plus the still-encoded segments.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedContainer {
    pub scales: Vec<f32>,
    pub biases: Vec<f32>,
    pub segments: Vec<Vec<u8>>,
}

impl CompressedContainer {
    /// Serialized size in bytes.
    pub fn byte_len(&self) -> usize {
        (self.scales.len() + self.biases.len()) * 4
            + self.segments.iter().map(|s| 4 + s.len()).sum::<usize>()
    }
}
