use std::{
    path::Path,
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    diagram::{d2::frame_to_d2, model::Frame},
    foundation::error::{SlideSyncError, SlideSyncResult},
    render::rasterizer::{FrameRasterizer, ensure_parent_dir},
};

/// `true` when the `d2` binary can be executed.
pub fn is_d2_on_path() -> bool {
    Command::new("d2")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Rasterizer that shells out to the `d2` CLI.
///
/// The D2 source is written next to the output image (same stem, `.d2` extension) and kept for
/// inspection.
#[derive(Clone, Debug)]
pub struct D2Rasterizer {
    program: String,
}

impl D2Rasterizer {
    /// Use `d2` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("d2")
    }

    /// Use a specific `d2` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for D2Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRasterizer for D2Rasterizer {
    fn name(&self) -> &'static str {
        "d2"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn rasterize(&self, frame: &Frame, out_path: &Path) -> SlideSyncResult<()> {
        ensure_parent_dir(out_path)?;
        let src_path = out_path.with_extension("d2");
        std::fs::write(&src_path, frame_to_d2(frame))
            .with_context(|| format!("write d2 source '{}'", src_path.display()))?;

        let output = Command::new(&self.program)
            .arg(&src_path)
            .arg(out_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SlideSyncError::render(format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.program
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SlideSyncError::render(format!(
                "d2 failed with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/d2.rs"]
mod tests;
