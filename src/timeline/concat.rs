use std::{collections::BTreeMap, fmt::Write as _, path::PathBuf};

use crate::{foundation::core::FrameId, timeline::assemble::ClipPlan};

impl ClipPlan {
    /// Render the plan as an ffmpeg concat-demuxer script.
    ///
    /// Segments whose frame has no rendered file are left out. The last file is listed a second
    /// time without a duration, which the demuxer needs to honor the final duration.
    pub fn to_ffconcat(&self, files: &BTreeMap<FrameId, PathBuf>) -> String {
        let mut out = String::from("ffconcat version 1.0\n");
        let mut last: Option<&PathBuf> = None;

        for seg in &self.segments {
            let Some(path) = files.get(&seg.frame) else {
                continue;
            };
            let _ = writeln!(out, "file '{}'", escape_single_quotes(path));
            let _ = writeln!(out, "duration {:.6}", seg.duration);
            last = Some(path);
        }

        if let Some(path) = last {
            let _ = writeln!(out, "file '{}'", escape_single_quotes(path));
        }
        out
    }
}

fn escape_single_quotes(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/concat.rs"]
mod tests;
