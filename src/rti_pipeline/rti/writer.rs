use std::io::Write;
use crate::rti_pipeline::common::error::Result;
use crate::rti_pipeline::rti::types::RtiDataset;

pub trait RtiWriter {
    fn write_rti(&self, dataset: &RtiDataset, output: &mut dyn Write) -> Result<()>;
}
