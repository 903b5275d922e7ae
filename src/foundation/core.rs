/// One spoken word with its audio bounds in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    /// Spoken token as reported by the audio producer.
    #[serde(default)]
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds (`>= start`).
    pub end: f64,
}

impl Word {
    /// Construct a word.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Closed time interval `[start, end]` in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
}

impl TimeSpan {
    /// The `(0.0, 0.0)` span used for slides without audio coverage.
    pub const ZERO: Self = Self {
        start: 0.0,
        end: 0.0,
    };

    /// Length of the span in seconds.
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Length of the span, raised to `floor` when shorter.
    pub fn duration_at_least(self, floor: f64) -> f64 {
        self.duration().max(floor)
    }

    /// `true` for the degenerate "no audio coverage" marker.
    pub fn is_zero(self) -> bool {
        self.start == 0.0 && self.end == 0.0
    }
}

/// Stable reference to a frame within one pipeline run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameId {
    /// Owning slide index.
    pub slide: usize,
    /// Reveal step within the slide (0-based).
    pub step: usize,
}

impl FrameId {
    /// Deterministic image file name for this frame.
    pub fn file_name(self, ext: &str) -> String {
        format!("slide_{:03}_frame_{:02}.{ext}", self.slide, self.step)
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.slide, self.step)
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
