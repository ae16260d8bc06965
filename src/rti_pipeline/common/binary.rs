//! Little-endian helpers for the binary parts of RTI files and containers.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::rti_pipeline::common::error::{FormatError, Result};

/// Reads `count` little-endian floats from the start of `data` and returns
/// them along with the bytes that follow the block.
pub fn split_f32_block<'a>(data: &'a [u8], count: usize, what: &'static str) -> Result<(Vec<f32>, &'a [u8])> {
    let truncated = |needed| FormatError::Truncated {
        what,
        needed,
        available: data.len(),
    };
    // A count whose byte length overflows can never fit in `data`.
    let needed = count.checked_mul(4).ok_or_else(|| truncated(usize::MAX))?;
    if data.len() < needed {
        return Err(truncated(needed).into());
    }
    let (block, rest) = data.split_at(needed);
    let mut values = vec![0f32; count];
    Cursor::new(block).read_f32_into::<LittleEndian>(&mut values)?;
    Ok((values, rest))
}

pub fn write_f32_block(buffer: &mut Vec<u8>, values: &[f32]) -> Result<()> {
    for &value in values {
        buffer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}
