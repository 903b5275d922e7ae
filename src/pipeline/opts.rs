use std::path::Path;

use anyhow::Context as _;

use crate::{
    diagram::builder::DEFAULT_GRAPH_TITLE,
    foundation::error::{SlideSyncError, SlideSyncResult},
    timeline::assemble::DEFAULT_MIN_SLIDE_DURATION,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Per-run pipeline options.
///
/// Every field has a default, so a JSON options file only needs the keys it overrides.
pub struct PipelineOpts {
    /// Minimum on-screen time per slide, in seconds.
    pub min_slide_duration: f64,
    /// Node cap applied to every slide graph.
    pub max_nodes: usize,
    /// Title given to graphs built from extracted entities.
    pub graph_title: String,
    /// Fallback node label for slides without a usable first sentence.
    pub fallback_label: String,
    /// Character cap for the opening slide's fallback label.
    pub fallback_label_chars: usize,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            min_slide_duration: DEFAULT_MIN_SLIDE_DURATION,
            max_nodes: 6,
            graph_title: DEFAULT_GRAPH_TITLE.to_owned(),
            fallback_label: "ML Component".to_owned(),
            fallback_label_chars: 40,
        }
    }
}

impl PipelineOpts {
    /// Check option invariants.
    pub fn validate(&self) -> SlideSyncResult<()> {
        if !self.min_slide_duration.is_finite() || self.min_slide_duration <= 0.0 {
            return Err(SlideSyncError::validation(
                "min_slide_duration must be finite and > 0",
            ));
        }
        if self.max_nodes == 0 {
            return Err(SlideSyncError::validation("max_nodes must be >= 1"));
        }
        if self.fallback_label.trim().is_empty() {
            return Err(SlideSyncError::validation(
                "fallback_label must not be empty",
            ));
        }
        if self.fallback_label_chars == 0 {
            return Err(SlideSyncError::validation(
                "fallback_label_chars must be >= 1",
            ));
        }
        Ok(())
    }

    /// Parse and validate options from JSON text.
    pub fn from_json_str(s: &str) -> SlideSyncResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load and validate options from a JSON file.
    pub fn from_path(path: &Path) -> SlideSyncResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read options file '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/opts.rs"]
mod tests;
