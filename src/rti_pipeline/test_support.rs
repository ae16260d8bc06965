//! Fixtures shared by the unit tests.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::rti::{RtiDataset, RtiShape};

/// Deterministic dataset whose planes are distinct, smooth gradients.
pub fn gradient_dataset(shape: RtiShape) -> RtiDataset {
    let planes = (0..shape.plane_count)
        .map(|p| {
            let mut plane = Plane::new(shape.width, shape.height, shape.channel_count);
            for y in 0..shape.height {
                for x in 0..shape.width {
                    for c in 0..shape.channel_count {
                        let value = (x * 7 + y * 3 + c * 40 + p * 17) % 256;
                        plane.set(y, x, c, value as u8);
                    }
                }
            }
            plane
        })
        .collect();

    RtiDataset {
        shape,
        coefficient_size: 1,
        scales: (0..shape.plane_count).map(|p| 0.5 + p as f32 * 0.25).collect(),
        biases: (0..shape.plane_count).map(|p| -(p as f32) * 1.5).collect(),
        planes,
    }
}

/// Dataset whose pixels are all gray (`r == g == b`), so the YCbCr
/// conversion is exact.
pub fn gray_dataset(shape: RtiShape) -> RtiDataset {
    let mut dataset = gradient_dataset(shape);
    for plane in &mut dataset.planes {
        for y in 0..plane.height {
            for x in 0..plane.width {
                let value = plane.get(y, x, 0);
                for c in 1..plane.channels {
                    plane.set(y, x, c, value);
                }
            }
        }
    }
    dataset
}

/// Serializes an RTI file by hand from its parts.
pub fn rti_bytes(header: &str, scales: &[f32], biases: &[f32], body: &[u8]) -> Vec<u8> {
    let mut bytes = header.as_bytes().to_vec();
    for &s in scales {
        bytes.write_f32::<LittleEndian>(s).unwrap();
    }
    for &b in biases {
        bytes.write_f32::<LittleEndian>(b).unwrap();
    }
    bytes.extend_from_slice(body);
    bytes
}

/// The 2x2, single-channel, two-plane dataset used as a concrete scenario.
pub fn tiny_dataset() -> RtiDataset {
    RtiDataset {
        shape: RtiShape::new(2, 2, 1, 2),
        coefficient_size: 1,
        scales: vec![1.0, 1.0],
        biases: vec![0.0, 0.0],
        planes: vec![
            Plane::from_vec(2, 2, 1, vec![10, 20, 30, 40]).unwrap(),
            Plane::from_vec(2, 2, 1, vec![50, 60, 70, 80]).unwrap(),
        ],
    }
}

/// Checks encoded sizes indexed by quality 1..=100. Adjacent qualities may
/// trade a few bytes (the quantization scaling changes formula at 50), but a
/// single step never loses more than 2% and ten steps never lose anything.
pub fn assert_size_tracks_quality(sizes: &[usize]) {
    assert_eq!(sizes.len(), 100);
    for (i, pair) in sizes.windows(2).enumerate() {
        assert!(
            pair[1] * 50 >= pair[0] * 49,
            "q{} -> q{} shrank {} -> {}",
            i + 1,
            i + 2,
            pair[0],
            pair[1]
        );
    }
    for (i, window) in sizes.windows(11).enumerate() {
        assert!(
            window[0] <= window[10],
            "q{} -> q{} shrank {} -> {}",
            i + 1,
            i + 11,
            window[0],
            window[10]
        );
    }
    assert!(sizes[0] < sizes[99]);
}
