use crate::{
    diagram::model::Frame,
    foundation::core::{FrameId, TimeSpan, Word},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One titled, timed unit of narration plus its diagram reveal sequence.
///
/// Created by [`crate::segment`] with title and body only. Frames are attached by the diagram
/// stages and words/bounds by [`crate::align`].
pub struct Slide {
    /// Position in the segmented sequence (contiguous from 0).
    pub index: usize,
    /// Normalized header, e.g. `"Slide 1:"`.
    pub title: String,
    /// Narration body with whitespace collapsed.
    pub body_text: String,
    /// Words assigned by the aligner (contiguous run of the global list).
    #[serde(default)]
    pub words: Vec<Word>,
    /// Audio start in seconds.
    #[serde(default)]
    pub start_time: f64,
    /// Audio end in seconds.
    #[serde(default)]
    pub end_time: f64,
    /// Progressive reveal frames.
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Slide {
    /// A freshly segmented slide with no timing or frames.
    pub fn new(index: usize, title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            body_text: body_text.into(),
            words: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            frames: Vec::new(),
        }
    }

    /// Whitespace-delimited token count of the body.
    pub fn token_count(&self) -> usize {
        self.body_text.split_whitespace().count()
    }

    /// Audio bounds as a span.
    pub fn span(&self) -> TimeSpan {
        TimeSpan {
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// Reference to one of this slide's frames.
    pub fn frame_id(&self, step: usize) -> FrameId {
        FrameId {
            slide: self.index,
            step,
        }
    }
}
