use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::rti_pipeline::common::error::{Result, RtiError};
use crate::rti_pipeline::experiment::types::LightDirection;

/// Produces a raster image of an RTI file lit from `light`.
pub trait Renderer {
    fn render(&self, rti: &Path, light: LightDirection, output: &Path) -> Result<()>;
}

/// Runs the JavaScript relighting script under node:
/// `node <script> -i <rti> -o <image> --lx=<x> --ly=<y>`.
#[derive(Debug, Clone)]
pub struct NodeRenderer {
    node: PathBuf,
    script: PathBuf,
}

impl NodeRenderer {
    pub fn new(node: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            node: node.into(),
            script: script.into(),
        }
    }
}

impl Default for NodeRenderer {
    fn default() -> Self {
        Self::new("node", "render.js")
    }
}

impl Renderer for NodeRenderer {
    fn render(&self, rti: &Path, light: LightDirection, output: &Path) -> Result<()> {
        debug!(rti = %rti.display(), output = %output.display(), lx = light.x, ly = light.y, "Rendering");

        let result = Command::new(&self.node)
            .arg(&self.script)
            .arg("-i")
            .arg(rti)
            .arg("-o")
            .arg(output)
            .arg(format!("--lx={}", light.x))
            .arg(format!("--ly={}", light.y))
            .output()
            .map_err(|e| RtiError::ExternalTool(format!("{}: {}", self.node.display(), e)))?;

        if !result.status.success() {
            return Err(RtiError::ExternalTool(format!(
                "renderer exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }
        if !output.exists() {
            return Err(RtiError::ExternalTool(format!(
                "renderer produced no image at {}",
                output.display()
            )));
        }
        Ok(())
    }
}
