//! Pipeline conversions module
//!
//! File-level orchestration: RTI file to compressed container and back.

mod output;
mod rti_container;

#[cfg(test)]
mod tests;

pub use output::write_atomically;
pub use rti_container::RtiContainerPipeline;
