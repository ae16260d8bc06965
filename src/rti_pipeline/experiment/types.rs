//! Experiment parameters and results

use std::fmt;
use std::path::{Path, PathBuf};

use crate::rti_pipeline::container::CodecConfig;
use crate::rti_pipeline::transform::TransformMode;

/// Qualities tried for both segment classes in the alpha/beta grid.
pub const DEFAULT_GRID: [u8; 3] = [30, 60, 90];

/// Light position handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDirection {
    pub x: f64,
    pub y: f64,
}

impl Default for LightDirection {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

/// Distance between a reference rendering and a reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Structural dissimilarity as reported by dssim (0 means identical).
    pub ssim: f64,
    pub psnr: f64,
    pub rmse: f64,
}

/// One codec setting of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPoint {
    pub mode: TransformMode,
    pub primary_quality: u8,
    pub chroma_quality: u8,
}

impl SweepPoint {
    pub fn direct(quality: u8) -> Self {
        Self {
            mode: TransformMode::Direct,
            primary_quality: quality,
            chroma_quality: quality,
        }
    }

    pub fn chroma_shared(alpha: u8, beta: u8) -> Self {
        Self {
            mode: TransformMode::ChromaShared,
            primary_quality: alpha,
            chroma_quality: beta,
        }
    }

    /// One direct-JPEG run per quality.
    pub fn jpeg_quality_sweep(qualities: impl IntoIterator<Item = u8>) -> Vec<Self> {
        qualities.into_iter().map(Self::direct).collect()
    }

    /// Every alpha (luma quality) paired with every beta (chroma quality).
    pub fn alpha_beta_grid(alphas: &[u8], betas: &[u8]) -> Vec<Self> {
        alphas
            .iter()
            .flat_map(|&alpha| betas.iter().map(move |&beta| Self::chroma_shared(alpha, beta)))
            .collect()
    }

    /// Codec settings for this point on top of `base`.
    pub fn apply(&self, base: &CodecConfig) -> CodecConfig {
        CodecConfig {
            mode: self.mode,
            primary_quality: self.primary_quality,
            chroma_quality: self.chroma_quality,
            ..base.clone()
        }
    }

    /// Quality column of the report: `q` for direct runs, `alpha/beta`
    /// for chroma-shared runs.
    pub fn quality_label(&self) -> String {
        match self.mode {
            TransformMode::Direct => self.primary_quality.to_string(),
            TransformMode::ChromaShared => format!("{}/{}", self.primary_quality, self.chroma_quality),
        }
    }
}

impl fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} q={}", self.mode.method_name(), self.quality_label())
    }
}

/// Outcome of one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub point: SweepPoint,
    /// File name of the dataset.
    pub file: String,
    pub original_size: u64,
    pub compressed_size: u64,
    pub similarity: Similarity,
}

impl RunResult {
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return f64::INFINITY;
        }
        self.original_size as f64 / self.compressed_size as f64
    }
}

/// Where a sweep reads its dataset, where it puts intermediate files and
/// how the codec is set up apart from the swept parameters.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub dataset: PathBuf,
    pub work_dir: PathBuf,
    pub light: LightDirection,
    pub codec: CodecConfig,
}

impl ExperimentConfig {
    pub fn builder(dataset: impl Into<PathBuf>) -> ExperimentConfigBuilder {
        ExperimentConfigBuilder {
            dataset: dataset.into(),
            work_dir: None,
            light: None,
            codec: None,
        }
    }

    /// Dataset file name without its directory.
    pub fn dataset_name(&self) -> String {
        self.dataset
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.dataset.display().to_string())
    }

    fn dataset_stem(&self) -> String {
        self.dataset
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string())
    }

    pub fn container_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}.crti", self.dataset_stem()))
    }

    pub fn reconstruction_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}-comp.rti", self.dataset_stem()))
    }

    /// Rendering of `rti` inside the work directory.
    pub fn rendering_path(&self, rti: &Path) -> PathBuf {
        let stem = rti
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "render".to_string());
        self.work_dir.join(format!("{}.png", stem))
    }
}

pub struct ExperimentConfigBuilder {
    dataset: PathBuf,
    work_dir: Option<PathBuf>,
    light: Option<LightDirection>,
    codec: Option<CodecConfig>,
}

impl ExperimentConfigBuilder {
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    pub fn light(mut self, light: LightDirection) -> Self {
        self.light = Some(light);
        self
    }

    pub fn codec(mut self, codec: CodecConfig) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn build(self) -> ExperimentConfig {
        ExperimentConfig {
            dataset: self.dataset,
            work_dir: self.work_dir.unwrap_or_else(|| PathBuf::from("out")),
            light: self.light.unwrap_or_default(),
            codec: self.codec.unwrap_or_default(),
        }
    }
}
