use std::io::Write;

use tracing::debug;

use crate::rti_pipeline::common::binary::write_f32_block;
use crate::rti_pipeline::common::error::Result;
use crate::rti_pipeline::rti::layout::interleave_body;
use crate::rti_pipeline::rti::types::{RtiDataset, QUANTIZED_LINEAR, RTI_MAGIC};
use crate::rti_pipeline::rti::writer::RtiWriter;

/// Comment line written at the top of every generated file.
const HSH_COMMENT: &str = "#HSH1.2";

pub struct HshRtiWriter;

impl RtiWriter for HshRtiWriter {
    fn write_rti(&self, dataset: &RtiDataset, output: &mut dyn Write) -> Result<()> {
        dataset.validate()?;
        let shape = &dataset.shape;
        debug!("Writing RTI file: {}", shape);

        let mut buffer = Vec::with_capacity(64 + shape.plane_count * 8 + shape.body_len());

        writeln!(buffer, "{}", HSH_COMMENT)?;
        writeln!(buffer, "{}", RTI_MAGIC)?;
        writeln!(buffer, "{} {} {}", shape.width, shape.height, shape.channel_count)?;
        writeln!(
            buffer,
            "{} {} {}",
            shape.plane_count, QUANTIZED_LINEAR, dataset.coefficient_size
        )?;

        write_f32_block(&mut buffer, &dataset.scales)?;
        write_f32_block(&mut buffer, &dataset.biases)?;

        buffer.extend_from_slice(&interleave_body(&dataset.planes, shape));

        output.write_all(&buffer)?;
        output.flush()?;

        debug!("RTI write complete, {} bytes", buffer.len());
        Ok(())
    }
}
