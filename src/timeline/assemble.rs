use crate::{foundation::core::FrameId, narration::slide::Slide};

/// Default on-screen floor for a slide, in seconds.
pub const DEFAULT_MIN_SLIDE_DURATION: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One frame held on screen for a fixed duration.
pub struct ClipSegment {
    /// Frame shown by this segment.
    pub frame: FrameId,
    /// Offset of the segment within the assembled timeline, in seconds.
    pub start: f64,
    /// How long the frame stays on screen, in seconds (`> 0`).
    pub duration: f64,
}

impl ClipSegment {
    /// Timeline offset where the segment ends.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Flat, ordered clip timeline for the external video assembler.
pub struct ClipPlan {
    /// Narration audio reference to mux under the clips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
    /// Segments in slide order, then frame order.
    pub segments: Vec<ClipSegment>,
    /// Sum of all segment durations.
    pub total_duration: f64,
}

impl ClipPlan {
    /// Attach the audio reference.
    pub fn with_audio_ref(mut self, audio_ref: Option<String>) -> Self {
        self.audio_ref = audio_ref;
        self
    }

    /// Segments belonging to one slide.
    pub fn slide_segments(&self, slide: usize) -> impl Iterator<Item = &ClipSegment> {
        self.segments.iter().filter(move |s| s.frame.slide == slide)
    }
}

/// Turn aligned slides into clip segments.
///
/// A slide stays on screen for `max(min_slide_duration, end_time - start_time)`, split evenly
/// across its frames. Slides without frames contribute nothing and leave no gap in the clip
/// offsets. A non-positive or non-finite floor falls back to [`DEFAULT_MIN_SLIDE_DURATION`].
#[tracing::instrument(skip(slides), fields(slides = slides.len()))]
pub fn assemble(slides: &[Slide], min_slide_duration: f64) -> ClipPlan {
    let floor = if min_slide_duration.is_finite() && min_slide_duration > 0.0 {
        min_slide_duration
    } else {
        DEFAULT_MIN_SLIDE_DURATION
    };

    let mut segments = Vec::with_capacity(slides.iter().map(|s| s.frames.len()).sum());
    let mut cursor = 0.0f64;

    for slide in slides {
        if slide.frames.is_empty() {
            tracing::warn!(slide = slide.index, "slide has no frames; skipping in timeline");
            continue;
        }

        let span = slide.span();
        if span.is_zero() {
            tracing::debug!(slide = slide.index, "slide has no audio; holding for the minimum duration");
        }
        let total = span.duration_at_least(floor);
        let per_frame = total / slide.frames.len() as f64;
        for frame in &slide.frames {
            segments.push(ClipSegment {
                frame: slide.frame_id(frame.step),
                start: cursor,
                duration: per_frame,
            });
            cursor += per_frame;
        }
    }

    ClipPlan {
        audio_ref: None,
        segments,
        total_duration: cursor,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assemble.rs"]
mod tests;
