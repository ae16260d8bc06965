use std::io::Write;

use crate::rti_pipeline::common::error::Result;
use crate::rti_pipeline::experiment::types::RunResult;

pub const REPORT_HEADER: &str = "Method;File;CompRatio;PSNR;RMSE;SSIM;Qua";

/// Writes the semicolon-separated result table, one row per run.
pub fn write_table(results: &[RunResult], output: &mut dyn Write) -> Result<()> {
    writeln!(output, "{}", REPORT_HEADER)?;
    for result in results {
        let similarity = &result.similarity;
        writeln!(
            output,
            "{};{};{};{};{};{};{}",
            result.point.mode.method_name(),
            result.file,
            result.compression_ratio(),
            similarity.psnr,
            similarity.rmse,
            similarity.ssim,
            result.point.quality_label()
        )?;
    }
    output.flush()?;
    Ok(())
}
