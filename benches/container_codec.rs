use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rti_compress::rti_pipeline::{
    CodecConfig, HshRtiWriter, Plane, RtiContainerPipeline, RtiDataset, RtiShape, RtiWriter, TransformMode,
};
use std::io::Cursor;

fn generate_mock_rti(shape: RtiShape) -> Vec<u8> {
    let planes = (0..shape.plane_count)
        .map(|p| {
            let mut data = Vec::with_capacity(shape.plane_len());
            for y in 0..shape.height {
                for x in 0..shape.width {
                    for c in 0..shape.channel_count {
                        data.push(((x + 2 * y + 40 * c + 17 * p) % 256) as u8);
                    }
                }
            }
            Plane { width: shape.width, height: shape.height, channels: shape.channel_count, data }
        })
        .collect();
    let dataset = RtiDataset {
        shape,
        coefficient_size: 1,
        scales: vec![1.0; shape.plane_count],
        biases: vec![0.0; shape.plane_count],
        planes,
    };

    let mut bytes = Vec::new();
    let _ = HshRtiWriter.write_rti(&dataset, &mut bytes);
    bytes
}

fn benchmark_compression_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_modes");
    let shape = RtiShape::default();
    let mock_data = generate_mock_rti(shape);

    let modes = vec![
        (TransformMode::Direct, "direct"),
        (TransformMode::ChromaShared, "chroma_shared"),
    ];

    for (mode, label) in modes {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &mock_data,
            |b, data| {
                let config = CodecConfig::builder()
                    .shape(shape)
                    .mode(mode)
                    .build();
                let pipeline = RtiContainerPipeline::new(config);

                b.iter(|| {
                    let mut output = Cursor::new(Vec::new());
                    let _ = pipeline.compress(black_box(data), &mut output);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_parallel_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_encode");
    let shape = RtiShape::default();
    let mock_data = generate_mock_rti(shape);

    for (parallel, label) in [(true, "parallel"), (false, "sequential")] {
        group.bench_function(label, |b| {
            let config = CodecConfig::builder()
                .shape(shape)
                .parallel(parallel)
                .build();
            let pipeline = RtiContainerPipeline::new(config);

            b.iter(|| {
                let mut output = Cursor::new(Vec::new());
                let _ = pipeline.compress(black_box(&mock_data), &mut output);
            });
        });
    }

    group.finish();
}

fn benchmark_decompression(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression");
    let shape = RtiShape::default();
    let mock_data = generate_mock_rti(shape);

    for (quality, label) in [(30u8, "q30"), (90u8, "q90")] {
        let config = CodecConfig::builder()
            .shape(shape)
            .quality(quality)
            .build();
        let pipeline = RtiContainerPipeline::new(config);
        let mut container = Vec::new();
        if pipeline.compress(&mock_data, &mut container).is_err() {
            continue;
        }

        group.bench_with_input(BenchmarkId::from_parameter(label), &container, |b, data| {
            b.iter(|| {
                let mut output = Cursor::new(Vec::new());
                let _ = pipeline.decompress(black_box(data), &mut output);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_compression_modes,
    benchmark_parallel_encode,
    benchmark_decompression
);
criterion_main!(benches);
