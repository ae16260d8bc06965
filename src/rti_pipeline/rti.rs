//! RTI file reading and writing module
//!
//! This module handles the hybrid text/binary HSH coefficient file: a
//! line-oriented text header followed by little-endian scale/bias floats and
//! the interleaved coefficient bytes.

mod header;
mod reader;
mod hsh_reader;
mod writer;
mod hsh_writer;
pub mod layout;
pub mod types;


pub use header::{HeaderCursor, HeaderLine};
pub use reader::RtiReader;
pub use hsh_reader::HshRtiReader;
pub use writer::RtiWriter;
pub use hsh_writer::HshRtiWriter;
pub use layout::{Axis, BODY_NESTING};
pub use types::{RtiDataset, RtiShape, QUANTIZED_LINEAR, RTI_MAGIC};
