use crate::rti_pipeline::common::error::Result;
use crate::rti_pipeline::rti::types::RtiDataset;

pub trait RtiReader {
    fn read_rti(&self, data: &[u8]) -> Result<RtiDataset>;
}
