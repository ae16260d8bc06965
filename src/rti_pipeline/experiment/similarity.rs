use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::rti_pipeline::common::error::{Result, RtiError};
use crate::rti_pipeline::experiment::types::Similarity;

/// Compares a reference image with a candidate image.
pub trait SimilarityMeter {
    fn measure(&self, reference: &Path, candidate: &Path) -> Result<Similarity>;
}

/// Parses the number a metric tool prints first, e.g. `0.0123` from
/// `0.0123\tcandidate.png` or `412.3` from `412.3 (0.00629)`.
pub fn parse_leading_number(tool: &str, output: &str) -> Result<f64> {
    let token = output
        .split_whitespace()
        .next()
        .ok_or_else(|| RtiError::ExternalTool(format!("{} printed nothing", tool)))?;
    token
        .parse::<f64>()
        .map_err(|_| RtiError::ExternalTool(format!("{} printed {:?}, expected a number", tool, output.trim())))
}

/// SSIM from `dssim`, PSNR and RMSE from ImageMagick `compare -metric`.
#[derive(Debug, Clone)]
pub struct ExternalToolMeter {
    dssim: PathBuf,
    compare: PathBuf,
}

impl ExternalToolMeter {
    pub fn new(dssim: impl Into<PathBuf>, compare: impl Into<PathBuf>) -> Self {
        Self {
            dssim: dssim.into(),
            compare: compare.into(),
        }
    }

    /// Runs `program` and returns stdout followed by stderr. `accepted`
    /// lists the exit codes that still carry a measurement.
    fn run(&self, program: &Path, args: &[&OsStr], accepted: &[i32]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| RtiError::ExternalTool(format!("{}: {}", program.display(), e)))?;

        let code = output.status.code();
        if !code.is_some_and(|c| accepted.contains(&c)) {
            return Err(RtiError::ExternalTool(format!(
                "{} exited with {}: {}",
                program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    fn compare_metric(&self, metric: &str, reference: &Path, candidate: &Path) -> Result<f64> {
        // compare exits with 1 when the images differ, which is the usual case.
        let text = self.run(
            &self.compare,
            &[
                OsStr::new("-metric"),
                OsStr::new(metric),
                reference.as_os_str(),
                candidate.as_os_str(),
                OsStr::new("null:"),
            ],
            &[0, 1],
        )?;
        parse_leading_number(metric, &text)
    }
}

impl Default for ExternalToolMeter {
    fn default() -> Self {
        Self::new("dssim", "compare")
    }
}

impl SimilarityMeter for ExternalToolMeter {
    fn measure(&self, reference: &Path, candidate: &Path) -> Result<Similarity> {
        let text = self.run(&self.dssim, &[reference.as_os_str(), candidate.as_os_str()], &[0])?;
        let ssim = parse_leading_number("dssim", &text)?;
        let psnr = self.compare_metric("PSNR", reference, candidate)?;
        let rmse = self.compare_metric("RMSE", reference, candidate)?;

        debug!(ssim, psnr, rmse, "Measured similarity");
        Ok(Similarity { ssim, psnr, rmse })
    }
}
