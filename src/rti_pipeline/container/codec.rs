use std::io::Write;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::rti_pipeline::common::error::{FormatError, InvariantViolation, Result, RtiError};
use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::common::timing::{PipelineTimings, Stage};
use crate::rti_pipeline::container::format::{read_container, ContainerWriter};
use crate::rti_pipeline::container::types::{CodecConfig, CompressedContainer};
use crate::rti_pipeline::plane_codec::PlaneCodec;
use crate::rti_pipeline::rti::RtiDataset;
use crate::rti_pipeline::transform::{ColorPlaneTransform, SegmentClass, TransformedPlanes};

/// Compresses RTI datasets into containers and back, using `C` for the
/// individual planes.
pub struct ContainerCodec<C: PlaneCodec> {
    codec: C,
    config: CodecConfig,
}

/// Prefixes corrupt-blob reasons with the segment they came from.
fn tag_segment(index: usize, err: RtiError) -> RtiError {
    match err {
        RtiError::Format(FormatError::CorruptBlob(reason)) => {
            FormatError::CorruptBlob(format!("segment {}: {}", index, reason)).into()
        }
        other => other,
    }
}

impl<C: PlaneCodec> ContainerCodec<C> {
    pub fn new(codec: C, config: CodecConfig) -> Self {
        Self { codec, config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CodecConfig) {
        self.config = config;
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn transform(&self) -> ColorPlaneTransform {
        ColorPlaneTransform::new(self.config.mode, self.config.chroma_rounding)
    }

    fn check_shape(&self, dataset: &RtiDataset) -> Result<()> {
        dataset.validate()?;
        if dataset.shape != self.config.shape {
            return Err(InvariantViolation::ShapeMismatch {
                expected: self.config.shape.to_string(),
                found: dataset.shape.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn encode_segment(&self, index: usize, class: SegmentClass, plane: &Plane) -> Result<Vec<u8>> {
        let quality = self.config.quality_for(class);
        let blob = self.codec.encode(plane, quality)?;
        debug!(
            segment = index,
            ?class,
            quality,
            bytes = blob.len(),
            "Encoded segment"
        );
        Ok(blob)
    }

    fn decode_segment(&self, index: usize, blob: &[u8]) -> Result<Plane> {
        let shape = &self.config.shape;
        let channels = self.config.mode.segment_channels(shape.channel_count);
        self.codec
            .decode(blob, shape.width, shape.height, channels)
            .map_err(|e| tag_segment(index, e))
    }

    /// Runs the forward transform and encodes every segment. The result
    /// keeps the fixed segment order whatever order the encodes finish in.
    pub fn encode_segments(&self, dataset: &RtiDataset, timings: &mut PipelineTimings) -> Result<CompressedContainer> {
        self.check_shape(dataset)?;

        let transformed = timings.time(Stage::Transform, || self.transform().forward(&dataset.planes))?;
        let segments = transformed.into_segments();
        let classes = self.config.mode.segment_classes(dataset.shape.plane_count);
        debug_assert_eq!(segments.len(), classes.len());

        let blobs = timings.time(Stage::Encode, || -> Result<Vec<Vec<u8>>> {
            if self.config.parallel {
                segments
                    .par_iter()
                    .zip(classes.par_iter())
                    .enumerate()
                    .map(|(index, (plane, class))| self.encode_segment(index, *class, plane))
                    .collect()
            } else {
                segments
                    .iter()
                    .zip(&classes)
                    .enumerate()
                    .map(|(index, (plane, class))| self.encode_segment(index, *class, plane))
                    .collect()
            }
        })?;

        Ok(CompressedContainer {
            scales: dataset.scales.clone(),
            biases: dataset.biases.clone(),
            segments: blobs,
        })
    }

    /// Decodes every segment and runs the inverse transform.
    pub fn decode_segments(&self, container: &CompressedContainer, timings: &mut PipelineTimings) -> Result<RtiDataset> {
        let shape = self.config.shape;
        let expected = self.config.segment_count();
        if container.segments.len() != expected {
            return Err(FormatError::WrongBlobCount {
                expected,
                found: container.segments.len(),
            }
            .into());
        }

        let planes = timings.time(Stage::Decode, || -> Result<Vec<Plane>> {
            if self.config.parallel {
                container
                    .segments
                    .par_iter()
                    .enumerate()
                    .map(|(index, blob)| self.decode_segment(index, blob))
                    .collect()
            } else {
                container
                    .segments
                    .iter()
                    .enumerate()
                    .map(|(index, blob)| self.decode_segment(index, blob))
                    .collect()
            }
        })?;

        let transformed = TransformedPlanes::from_segments(self.config.mode, shape.plane_count, planes)?;
        let planes = timings.time(Stage::InverseTransform, || self.transform().inverse(transformed))?;

        let dataset = RtiDataset {
            shape,
            coefficient_size: self.config.coefficient_size,
            scales: container.scales.clone(),
            biases: container.biases.clone(),
            planes,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn compress_with_timings(&self, dataset: &RtiDataset) -> Result<(Vec<u8>, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let container = self.encode_segments(dataset, &mut timings)?;

        let bytes = timings.time(Stage::Serialize, || -> Result<Vec<u8>> {
            let mut writer = ContainerWriter::new(
                Vec::with_capacity(container.byte_len()),
                dataset.shape.plane_count,
                self.config.segment_count(),
            );
            writer.write_header(&container.scales, &container.biases)?;
            for (index, segment) in container.segments.iter().enumerate() {
                writer.write_segment(index, segment)?;
            }
            writer.finish()
        })?;

        info!(
            mode = %self.config.mode,
            codec = self.codec.name(),
            segments = container.segments.len(),
            bytes = bytes.len(),
            "Compressed dataset"
        );
        Ok((bytes, timings))
    }

    /// Compresses `dataset` into an in-memory container.
    #[instrument(skip_all, fields(shape = %dataset.shape))]
    pub fn compress(&self, dataset: &RtiDataset) -> Result<Vec<u8>> {
        self.compress_with_timings(dataset).map(|(bytes, _)| bytes)
    }

    /// Compresses into `output`. Nothing is written unless compression
    /// succeeded as a whole.
    pub fn compress_to(&self, dataset: &RtiDataset, output: &mut dyn Write) -> Result<()> {
        let bytes = self.compress(dataset)?;
        output.write_all(&bytes)?;
        output.flush()?;
        Ok(())
    }

    pub fn decompress_with_timings(&self, data: &[u8]) -> Result<(RtiDataset, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let shape = self.config.shape;

        let container = timings.time(Stage::Parse, || {
            read_container(data, shape.plane_count, self.config.segment_count())
        })?;
        let dataset = self.decode_segments(&container, &mut timings)?;

        info!(
            mode = %self.config.mode,
            codec = self.codec.name(),
            input_bytes = data.len(),
            "Decompressed container"
        );
        Ok((dataset, timings))
    }

    /// Parses and decodes a container produced with the same configuration.
    #[instrument(skip_all, fields(input_size = data.len()))]
    pub fn decompress(&self, data: &[u8]) -> Result<RtiDataset> {
        self.decompress_with_timings(data).map(|(dataset, _)| dataset)
    }
}
