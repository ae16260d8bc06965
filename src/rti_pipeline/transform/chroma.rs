//! Element-wise averaging of chroma planes across a dataset.

use crate::rti_pipeline::common::plane::Plane;
use crate::rti_pipeline::transform::types::ChromaRounding;

/// Running per-sample sum of single-channel planes.
#[derive(Debug, Clone)]
pub struct ChromaAccumulator {
    width: usize,
    height: usize,
    sums: Vec<u32>,
    count: u32,
}

impl ChromaAccumulator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            sums: vec![0; width * height],
            count: 0,
        }
    }

    pub fn add(&mut self, plane: &Plane) {
        debug_assert_eq!(plane.data.len(), self.sums.len());
        for (sum, &value) in self.sums.iter_mut().zip(&plane.data) {
            *sum += value as u32;
        }
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean plane. Integer division of the non-negative sum equals
    /// truncating the floating-point mean, so both rules stay exact.
    pub fn finish(self, rounding: ChromaRounding) -> Plane {
        let n = self.count.max(1);
        let data = self
            .sums
            .iter()
            .map(|&sum| match rounding {
                ChromaRounding::Truncate => (sum / n) as u8,
                ChromaRounding::RoundHalfUp => ((2 * sum + n) / (2 * n)) as u8,
            })
            .collect();

        Plane {
            width: self.width,
            height: self.height,
            channels: 1,
            data,
        }
    }
}
