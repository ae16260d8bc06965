use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use tracing::trace;

use crate::rti_pipeline::common::binary::{split_f32_block, write_f32_block};
use crate::rti_pipeline::common::error::{FormatError, InvariantViolation, Result};
use crate::rti_pipeline::container::types::CompressedContainer;

/// Progress of a [`ContainerWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Init,
    WroteHeader,
    WritingSegments { next: usize },
    Done,
}

/// Writes a container strictly in order: header, then segments
/// `0..segment_count` one after another.
pub struct ContainerWriter<W: Write> {
    sink: W,
    plane_count: usize,
    segment_count: usize,
    state: WriterState,
}

impl<W: Write> ContainerWriter<W> {
    pub fn new(sink: W, plane_count: usize, segment_count: usize) -> Self {
        Self {
            sink,
            plane_count,
            segment_count,
            state: WriterState::Init,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn write_header(&mut self, scales: &[f32], biases: &[f32]) -> Result<()> {
        if self.state != WriterState::Init {
            return Err(InvariantViolation::HeaderRewritten.into());
        }
        for (what, values) in [("scales", scales), ("biases", biases)] {
            if values.len() != self.plane_count {
                return Err(InvariantViolation::CountMismatch {
                    what,
                    expected: self.plane_count,
                    found: values.len(),
                }
                .into());
            }
        }

        let mut header = Vec::with_capacity(self.plane_count * 8);
        write_f32_block(&mut header, scales)?;
        write_f32_block(&mut header, biases)?;
        self.sink.write_all(&header)?;

        self.state = if self.segment_count == 0 {
            WriterState::Done
        } else {
            WriterState::WroteHeader
        };
        Ok(())
    }

    /// Appends segment `index`, which must be the next one due.
    pub fn write_segment(&mut self, index: usize, blob: &[u8]) -> Result<()> {
        let next = match self.state {
            WriterState::Init => return Err(InvariantViolation::HeaderNotWritten("segment written").into()),
            WriterState::WroteHeader => 0,
            WriterState::WritingSegments { next } => next,
            WriterState::Done => self.segment_count,
        };
        if index != next || next >= self.segment_count {
            return Err(InvariantViolation::SegmentOutOfOrder {
                expected: next,
                got: index,
            }
            .into());
        }

        let length = i32::try_from(blob.len()).map_err(|_| InvariantViolation::SegmentTooLarge(blob.len()))?;
        self.sink.write_i32::<LittleEndian>(length)?;
        self.sink.write_all(blob)?;
        trace!("Wrote segment {} ({} bytes)", index, blob.len());

        self.state = if next + 1 == self.segment_count {
            WriterState::Done
        } else {
            WriterState::WritingSegments { next: next + 1 }
        };
        Ok(())
    }

    /// Flushes and returns the sink once every segment has been written.
    pub fn finish(mut self) -> Result<W> {
        match self.state {
            WriterState::Done => {
                self.sink.flush()?;
                Ok(self.sink)
            }
            WriterState::Init => Err(InvariantViolation::HeaderNotWritten("finished").into()),
            WriterState::WroteHeader => Err(InvariantViolation::IncompleteContainer {
                written: 0,
                expected: self.segment_count,
            }
            .into()),
            WriterState::WritingSegments { next } => Err(InvariantViolation::IncompleteContainer {
                written: next,
                expected: self.segment_count,
            }
            .into()),
        }
    }
}

impl CompressedContainer {
    pub fn write_to<W: Write>(&self, sink: W) -> Result<W> {
        let mut writer = ContainerWriter::new(sink, self.scales.len(), self.segments.len());
        writer.write_header(&self.scales, &self.biases)?;
        for (index, segment) in self.segments.iter().enumerate() {
            writer.write_segment(index, segment)?;
        }
        writer.finish()
    }
}

/// Parses a container with `plane_count` scales/biases and exactly
/// `segment_count` segments.
pub fn read_container(data: &[u8], plane_count: usize, segment_count: usize) -> Result<CompressedContainer> {
    let (scales, rest) = split_f32_block(data, plane_count, "scales")?;
    let (biases, mut rest) = split_f32_block(rest, plane_count, "biases")?;

    let mut segments = Vec::new();

    while !rest.is_empty() {
        if rest.len() < 4 {
            return Err(FormatError::Truncated {
                what: "segment length prefix",
                needed: 4,
                available: rest.len(),
            }
            .into());
        }
        let length = LittleEndian::read_i32(&rest[..4]);
        let Ok(length) = usize::try_from(length) else {
            return Err(FormatError::CorruptBlob(format!(
                "segment {} has negative length {}",
                segments.len(),
                length
            ))
            .into());
        };
        let body = &rest[4..];
        if body.len() < length {
            return Err(FormatError::Truncated {
                what: "segment body",
                needed: length,
                available: body.len(),
            }
            .into());
        }
        segments.push(body[..length].to_vec());
        rest = &body[length..];
    }

    if segments.len() != segment_count {
        return Err(FormatError::WrongBlobCount {
            expected: segment_count,
            found: segments.len(),
        }
        .into());
    }

    Ok(CompressedContainer {
        scales,
        biases,
        segments,
    })
}
