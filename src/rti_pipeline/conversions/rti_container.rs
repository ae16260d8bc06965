use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::rti_pipeline::{
    common::error::{Result, RtiError},
    common::timing::{PipelineTimings, Stage},
    container::{CodecConfig, ContainerCodec},
    conversions::output::write_atomically,
    plane_codec::{JpegPlaneCodec, PlaneCodec},
    rti::{HshRtiReader, HshRtiWriter, RtiReader, RtiWriter},
};

/// RTI file <-> compressed container, generic over the RTI reader and
/// writer and the per-plane codec.
pub struct RtiContainerPipeline<R: RtiReader, W: RtiWriter, C: PlaneCodec> {
    reader: R,
    writer: W,
    codec: ContainerCodec<C>,
}

impl RtiContainerPipeline<HshRtiReader, HshRtiWriter, JpegPlaneCodec> {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            reader: HshRtiReader,
            writer: HshRtiWriter,
            codec: ContainerCodec::new(JpegPlaneCodec, config),
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(path).map_err(|e| {
        RtiError::IoError(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })
}

impl<R: RtiReader, W: RtiWriter, C: PlaneCodec> RtiContainerPipeline<R, W, C> {
    pub fn with_custom(reader: R, writer: W, codec: C, config: CodecConfig) -> Self {
        Self {
            reader,
            writer,
            codec: ContainerCodec::new(codec, config),
        }
    }

    /// Parses an RTI file and writes its compressed container to `output`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn compress_with_timings(&self, input_data: &[u8], output: &mut dyn Write) -> Result<PipelineTimings> {
        info!("Starting RTI compression");
        let mut timings = PipelineTimings::new();

        let dataset = timings.time(Stage::Read, || {
            let _span = tracing::info_span!("parse_rti").entered();
            self.reader.read_rti(input_data)
        })?;

        let (bytes, codec_timings) = self.codec.compress_with_timings(&dataset)?;
        timings.merge(codec_timings);

        timings.time(Stage::Write, || -> Result<()> {
            let _span = tracing::info_span!("write_container", bytes = bytes.len()).entered();
            output.write_all(&bytes)?;
            output.flush()?;
            Ok(())
        })?;

        info!(
            shape = %dataset.shape,
            input_bytes = input_data.len(),
            output_bytes = bytes.len(),
            "Compression complete"
        );
        Ok(timings)
    }

    pub fn compress(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.compress_with_timings(input_data, output).map(|_| ())
    }

    /// Decodes a container and writes the reconstructed RTI file to `output`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn decompress_with_timings(&self, input_data: &[u8], output: &mut dyn Write) -> Result<PipelineTimings> {
        info!("Starting container decompression");

        let (dataset, mut timings) = self.codec.decompress_with_timings(input_data)?;

        timings.time(Stage::Write, || {
            let _span = tracing::info_span!("write_rti").entered();
            self.writer.write_rti(&dataset, output)
        })?;

        info!(shape = %dataset.shape, "Decompression complete");
        Ok(timings)
    }

    pub fn decompress(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.decompress_with_timings(input_data, output).map(|_| ())
    }

    /// Compresses `input_path` into `output_path`. The output only appears
    /// once the whole container has been written.
    #[instrument(skip(self, input_path, output_path))]
    pub fn compress_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Compressing file"
        );

        let input_data = read_input(input_path)?;
        write_atomically(output_path, |sink| self.compress_with_timings(&input_data, sink))
    }

    pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<()> {
        let timings = self.compress_file_with_timings(input_path, output_path)?;
        timings.log_summary();
        Ok(())
    }

    /// Decompresses `input_path` into `output_path`, atomically.
    #[instrument(skip(self, input_path, output_path))]
    pub fn decompress_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Decompressing file"
        );

        let input_data = read_input(input_path)?;
        write_atomically(output_path, |sink| self.decompress_with_timings(&input_data, sink))
    }

    pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<()> {
        let timings = self.decompress_file_with_timings(input_path, output_path)?;
        timings.log_summary();
        Ok(())
    }

    pub fn config(&self) -> &CodecConfig {
        self.codec.config()
    }

    pub fn set_config(&mut self, config: CodecConfig) {
        self.codec.set_config(config);
    }
}
