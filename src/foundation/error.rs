/// Convenience result type used across slidesync.
pub type SlideSyncResult<T> = Result<T, SlideSyncError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Only caller contract breaches (empty narration, broken word timelines, invalid options) are
/// surfaced. Upstream degradation is absorbed by the stages themselves.
#[derive(thiserror::Error, Debug)]
pub enum SlideSyncError {
    /// Narration text was empty or whitespace-only.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Word timestamps violate the producer contract (negative, non-finite or non-monotonic).
    #[error("word timeline error: {0}")]
    EmptyWords(String),

    /// Invalid user-provided options or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be rasterized.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideSyncError {
    /// Build a [`SlideSyncError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`SlideSyncError::EmptyWords`] value.
    pub fn empty_words(msg: impl Into<String>) -> Self {
        Self::EmptyWords(msg.into())
    }

    /// Build a [`SlideSyncError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideSyncError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SlideSyncError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SlideSyncError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
