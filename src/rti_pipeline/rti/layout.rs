//! Byte order of the RTI coefficient body.
//!
//! The body is stored pixel by pixel with the plane index innermost: all
//! planes of `(y, x, channel)` are contiguous. Reader and writer both go
//! through [`split_body`] and [`interleave_body`] so the order cannot drift
//! between them.

use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::rti::types::RtiShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Y,
    X,
    Channel,
    Plane,
}

/// Body nesting, outermost axis first.
pub const BODY_NESTING: [Axis; 4] = [Axis::Y, Axis::X, Axis::Channel, Axis::Plane];

/// Offset of one sample inside the body.
#[inline]
pub fn body_offset(shape: &RtiShape, y: usize, x: usize, channel: usize, plane: usize) -> usize {
    ((y * shape.width + x) * shape.channel_count + channel) * shape.plane_count + plane
}

/// Splits a body of exactly `shape.body_len()` bytes into per-plane matrices.
///
/// Within a plane the `(y, x, channel)` order equals the body's outer three
/// axes, so sample `k` of every plane comes from body chunk `k`.
pub fn split_body(body: &[u8], shape: &RtiShape) -> Vec<Plane> {
    debug_assert_eq!(body.len(), shape.body_len());
    let mut planes: Vec<Plane> = (0..shape.plane_count)
        .map(|_| Plane::new(shape.width, shape.height, shape.channel_count))
        .collect();

    if shape.plane_count == 0 {
        return planes;
    }

    for (k, samples) in body.chunks_exact(shape.plane_count).enumerate() {
        for (plane, &value) in planes.iter_mut().zip(samples) {
            plane.data[k] = value;
        }
    }
    planes
}

/// Inverse of [`split_body`]. All planes must already share `shape`.
pub fn interleave_body(planes: &[Plane], shape: &RtiShape) -> Vec<u8> {
    let mut body = vec![0u8; shape.body_len()];
    if shape.plane_count == 0 {
        return body;
    }

    for (k, samples) in body.chunks_exact_mut(shape.plane_count).enumerate() {
        for (slot, plane) in samples.iter_mut().zip(planes) {
            *slot = plane.data[k];
        }
    }
    body
}
