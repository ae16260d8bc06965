//! Byte matrix holding one coefficient plane or one transform-domain plane.

use std::fmt;

/// A `height × width × channels` matrix of `u8` samples, row-major with
/// channels interleaved (`[y][x][channel]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Plane {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0u8; width * height * channels],
        }
    }

    /// Wraps an existing buffer. Returns `None` when the buffer length does
    /// not match the dimensions.
    pub fn from_vec(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * channels {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn index(&self, y: usize, x: usize, channel: usize) -> usize {
        (y * self.width + x) * self.channels + channel
    }

    #[inline]
    pub fn get(&self, y: usize, x: usize, channel: usize) -> u8 {
        self.data[self.index(y, x, channel)]
    }

    #[inline]
    pub fn set(&mut self, y: usize, x: usize, channel: usize, value: u8) {
        let idx = self.index(y, x, channel);
        self.data[idx] = value;
    }

    pub fn same_shape(&self, other: &Plane) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Human-readable `WxHxC` shape, used in error messages.
    pub fn shape(&self) -> String {
        format!("{}x{}x{}", self.width, self.height, self.channels)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plane {}", self.shape())
    }
}
