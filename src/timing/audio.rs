use std::path::Path;

use anyhow::Context as _;

use crate::{foundation::core::Word, foundation::error::SlideSyncResult};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Output of the external speech synthesizer.
///
/// Accepts both the canonical snake_case keys and the `audio_url` / `duration` / `timestamps`
/// shape emitted by the TTS service.
pub struct AudioTimeline {
    /// Reference to the synthesized audio file.
    #[serde(
        default,
        alias = "audio_url",
        alias = "audioRef",
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_ref: Option<String>,
    /// Total audio length in seconds, as reported by the producer.
    #[serde(default, alias = "duration", alias = "durationSeconds")]
    pub duration_seconds: f64,
    /// Per-word timestamps, non-decreasing in `start`.
    #[serde(default, alias = "timestamps")]
    pub words: Vec<Word>,
}

impl AudioTimeline {
    /// Parse from JSON text. Timestamp validation happens at alignment.
    pub fn from_json_str(s: &str) -> SlideSyncResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file.
    pub fn from_path(path: &Path) -> SlideSyncResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read audio timeline '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/audio.rs"]
mod tests;
