#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    use crate::rti_pipeline::common::error::{FormatError, Result, RtiError};
    use crate::rti_pipeline::common::timing::Stage;
    use crate::rti_pipeline::container::CodecConfig;
    use crate::rti_pipeline::conversions::{write_atomically, RtiContainerPipeline};
    use crate::rti_pipeline::plane_codec::StoredPlaneCodec;
    use crate::rti_pipeline::rti::{HshRtiReader, HshRtiWriter, RtiDataset, RtiReader, RtiShape, RtiWriter};
    use crate::rti_pipeline::test_support::{gradient_dataset, tiny_dataset};
    use crate::rti_pipeline::transform::TransformMode;

    struct MockReader {
        should_fail: bool,
        dataset: RtiDataset,
    }

    impl RtiReader for MockReader {
        fn read_rti(&self, _data: &[u8]) -> Result<RtiDataset> {
            if self.should_fail {
                return Err(FormatError::BadMagic("mock".to_string()).into());
            }
            Ok(self.dataset.clone())
        }
    }

    struct MockWriter {
        should_fail: bool,
        written: Arc<Mutex<Vec<RtiDataset>>>,
    }

    impl RtiWriter for MockWriter {
        fn write_rti(&self, dataset: &RtiDataset, output: &mut dyn Write) -> Result<()> {
            if self.should_fail {
                output.write_all(b"partial")?;
                return Err(RtiError::IoError(std::io::Error::other("mock write error")));
            }
            self.written.lock().unwrap().push(dataset.clone());
            output.write_all(b"rti")?;
            Ok(())
        }
    }

    fn direct_config(shape: RtiShape) -> CodecConfig {
        CodecConfig::builder()
            .shape(shape)
            .mode(TransformMode::Direct)
            .quality(90)
            .build()
    }

    fn hsh_bytes(dataset: &RtiDataset) -> Vec<u8> {
        let mut bytes = Vec::new();
        HshRtiWriter.write_rti(dataset, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_successful_compress_and_decompress() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let dataset = tiny_dataset();
        let pipeline = RtiContainerPipeline::with_custom(
            MockReader { should_fail: false, dataset: dataset.clone() },
            MockWriter { should_fail: false, written: written.clone() },
            StoredPlaneCodec,
            direct_config(dataset.shape),
        );

        let mut container = Cursor::new(Vec::new());
        pipeline.compress(b"fake rti data", &mut container).unwrap();

        let mut output = Cursor::new(Vec::new());
        pipeline.decompress(container.get_ref(), &mut output).unwrap();

        assert_eq!(output.into_inner(), b"rti");
        assert_eq!(*written.lock().unwrap(), vec![dataset]);
    }

    #[test]
    fn test_reader_failure() {
        let pipeline = RtiContainerPipeline::with_custom(
            MockReader { should_fail: true, dataset: tiny_dataset() },
            MockWriter { should_fail: false, written: Arc::new(Mutex::new(Vec::new())) },
            StoredPlaneCodec,
            direct_config(RtiShape::new(2, 2, 1, 2)),
        );

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.compress(b"fake rti data", &mut output);

        assert!(matches!(result, Err(RtiError::Format(FormatError::BadMagic(_)))));
        assert!(output.get_ref().is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let dataset = tiny_dataset();
        let pipeline = RtiContainerPipeline::with_custom(
            MockReader { should_fail: false, dataset: dataset.clone() },
            MockWriter { should_fail: true, written: Arc::new(Mutex::new(Vec::new())) },
            StoredPlaneCodec,
            direct_config(dataset.shape),
        );

        let mut container = Vec::new();
        pipeline.compress(b"fake rti data", &mut container).unwrap();

        let result = pipeline.decompress(&container, &mut Vec::<u8>::new());
        assert!(matches!(result, Err(RtiError::IoError(_))));
    }

    #[test]
    fn test_hsh_round_trip_is_byte_identical() {
        let dataset = gradient_dataset(RtiShape::new(5, 3, 3, 4));
        let original = hsh_bytes(&dataset);
        let pipeline = RtiContainerPipeline::with_custom(
            HshRtiReader,
            HshRtiWriter,
            StoredPlaneCodec,
            direct_config(dataset.shape),
        );

        let mut container = Vec::new();
        let compress_timings = pipeline.compress_with_timings(&original, &mut container).unwrap();
        let mut restored = Vec::new();
        let decompress_timings = pipeline.decompress_with_timings(&container, &mut restored).unwrap();

        assert_eq!(restored, original);
        for stage in [Stage::Read, Stage::Transform, Stage::Encode, Stage::Serialize, Stage::Write] {
            assert!(compress_timings.stage(stage).is_some(), "missing {}", stage);
        }
        for stage in [Stage::Parse, Stage::Decode, Stage::InverseTransform, Stage::Write] {
            assert!(decompress_timings.stage(stage).is_some(), "missing {}", stage);
        }
        assert_eq!(decompress_timings.stage(Stage::Encode), None);
    }

    #[test]
    fn test_compress_rejects_shape_other_than_configured() {
        let dataset = gradient_dataset(RtiShape::new(5, 3, 3, 4));
        let pipeline = RtiContainerPipeline::new(CodecConfig::default());

        let result = pipeline.compress(&hsh_bytes(&dataset), &mut Vec::<u8>::new());
        assert!(matches!(result, Err(RtiError::Invariant(_))));
    }

    #[test]
    fn test_jpeg_pipeline_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vase.rti");
        let container = dir.path().join("vase.crti");
        let output = dir.path().join("vase-comp.rti");

        let dataset = gradient_dataset(RtiShape::new(16, 12, 3, 9));
        std::fs::write(&input, hsh_bytes(&dataset)).unwrap();

        let config = CodecConfig::builder().shape(dataset.shape).quality(90).build();
        let pipeline = RtiContainerPipeline::new(config);
        pipeline.compress_file(&input, &container).unwrap();
        pipeline.decompress_file(&container, &output).unwrap();

        let restored = HshRtiReader.read_rti(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(restored.shape, dataset.shape);
        assert_eq!(restored.scales, dataset.scales);
        assert_eq!(restored.biases, dataset.biases);
    }

    #[test]
    fn test_failed_decompress_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.crti");
        let output = dir.path().join("out.rti");
        std::fs::write(&input, [0u8; 10]).unwrap();

        let pipeline = RtiContainerPipeline::new(CodecConfig::default());
        let result = pipeline.decompress_file(&input, &output);

        assert!(matches!(result, Err(RtiError::Format(FormatError::Truncated { .. }))));
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.crti");
        let output = dir.path().join("out.rti");
        std::fs::write(&output, b"previous").unwrap();

        let dataset = tiny_dataset();
        let pipeline = RtiContainerPipeline::with_custom(
            MockReader { should_fail: false, dataset: dataset.clone() },
            MockWriter { should_fail: true, written: Arc::new(Mutex::new(Vec::new())) },
            StoredPlaneCodec,
            direct_config(dataset.shape),
        );
        let mut container = Vec::new();
        pipeline.compress(b"fake", &mut container).unwrap();
        std::fs::write(&input, &container).unwrap();

        assert!(pipeline.decompress_file(&input, &output).is_err());
        assert_eq!(std::fs::read(&output).unwrap(), b"previous");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = RtiContainerPipeline::new(CodecConfig::default());

        let result = pipeline.compress_file(dir.path().join("missing.rti"), dir.path().join("out.crti"));

        assert!(matches!(result, Err(RtiError::IoError(_))));
        assert!(!dir.path().join("out.crti").exists());
    }

    #[test]
    fn test_write_atomically_replaces_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old").unwrap();

        let value = write_atomically(&path, |sink| {
            sink.write_all(b"new contents")?;
            Ok(7)
        })
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(std::fs::read(&path).unwrap(), b"new contents");
    }

    #[test]
    fn test_set_config() {
        let mut pipeline = RtiContainerPipeline::new(CodecConfig::default());
        assert_eq!(pipeline.config().mode, TransformMode::ChromaShared);

        pipeline.set_config(direct_config(RtiShape::new(2, 2, 1, 2)));
        assert_eq!(pipeline.config().mode, TransformMode::Direct);
        assert_eq!(pipeline.config().shape, RtiShape::new(2, 2, 1, 2));
    }
}
