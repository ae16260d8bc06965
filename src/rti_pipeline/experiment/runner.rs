use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::rti_pipeline::common::error::Result;
use crate::rti_pipeline::conversions::RtiContainerPipeline;
use crate::rti_pipeline::experiment::renderer::{NodeRenderer, Renderer};
use crate::rti_pipeline::experiment::similarity::{ExternalToolMeter, SimilarityMeter};
use crate::rti_pipeline::experiment::types::{ExperimentConfig, RunResult, SweepPoint};
use crate::rti_pipeline::plane_codec::{JpegPlaneCodec, PlaneCodec};
use crate::rti_pipeline::rti::{HshRtiReader, HshRtiWriter, RtiReader, RtiShape};

/// Runs sweep points against one dataset: compress, decompress, render
/// both files, measure.
pub struct ExperimentRunner<R: Renderer, M: SimilarityMeter, C: PlaneCodec> {
    config: ExperimentConfig,
    renderer: R,
    meter: M,
    pipeline: RtiContainerPipeline<HshRtiReader, HshRtiWriter, C>,
}

impl ExperimentRunner<NodeRenderer, ExternalToolMeter, JpegPlaneCodec> {
    pub fn new(config: ExperimentConfig) -> Self {
        Self::with_custom(config, NodeRenderer::default(), ExternalToolMeter::default(), JpegPlaneCodec)
    }
}

impl<R: Renderer, M: SimilarityMeter, C: PlaneCodec> ExperimentRunner<R, M, C> {
    pub fn with_custom(config: ExperimentConfig, renderer: R, meter: M, codec: C) -> Self {
        let pipeline = RtiContainerPipeline::with_custom(HshRtiReader, HshRtiWriter, codec, config.codec.clone());
        Self {
            config,
            renderer,
            meter,
            pipeline,
        }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Reads the dataset header so runs use the dataset's own shape.
    fn read_dataset_shape(&self) -> Result<RtiShape> {
        let data = std::fs::read(&self.config.dataset)?;
        Ok(HshRtiReader.read_rti(&data)?.shape)
    }

    /// Renders the untouched dataset once; every run is compared against it.
    pub fn render_reference(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.config.work_dir)?;
        let output = self.config.rendering_path(&self.config.dataset);
        self.renderer.render(&self.config.dataset, self.config.light, &output)?;
        Ok(output)
    }

    /// Runs one sweep point and measures it against `reference`.
    #[instrument(skip_all, fields(point = %point))]
    pub fn run_point(&mut self, point: &SweepPoint, reference: &Path) -> Result<RunResult> {
        std::fs::create_dir_all(&self.config.work_dir)?;
        let container = self.config.container_path();
        let reconstruction = self.config.reconstruction_path();

        self.pipeline.set_config(point.apply(&self.config.codec));
        self.pipeline.compress_file(&self.config.dataset, &container)?;
        self.pipeline.decompress_file(&container, &reconstruction)?;

        let rendering = self.config.rendering_path(&reconstruction);
        self.renderer.render(&reconstruction, self.config.light, &rendering)?;
        let similarity = self.meter.measure(reference, &rendering)?;

        let result = RunResult {
            point: *point,
            file: self.config.dataset_name(),
            original_size: std::fs::metadata(&self.config.dataset)?.len(),
            compressed_size: std::fs::metadata(&container)?.len(),
            similarity,
        };

        info!(
            ratio = result.compression_ratio(),
            ssim = similarity.ssim,
            psnr = similarity.psnr,
            rmse = similarity.rmse,
            "Run complete"
        );
        Ok(result)
    }

    /// Runs every point in order. The first failing run aborts the sweep.
    #[instrument(skip_all, fields(dataset = %self.config.dataset.display(), points = points.len()))]
    pub fn run_sweep(&mut self, points: &[SweepPoint]) -> Result<Vec<RunResult>> {
        self.config.codec.shape = self.read_dataset_shape()?;
        info!(shape = %self.config.codec.shape, "Starting sweep");

        let reference = self.render_reference()?;
        points.iter().map(|point| self.run_point(point, &reference)).collect()
    }
}
