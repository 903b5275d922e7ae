use crate::{
    foundation::core::Word,
    foundation::error::{SlideSyncError, SlideSyncResult},
    narration::slide::Slide,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Bookkeeping from one alignment pass.
pub struct AlignReport {
    /// Words in the input timeline.
    pub words_total: usize,
    /// Words attached to some slide.
    pub words_assigned: usize,
    /// Slides that received no words and carry the `(0, 0)` marker.
    pub slides_without_audio: usize,
}

impl AlignReport {
    /// Trailing words no slide consumed.
    pub fn words_unassigned(&self) -> usize {
        self.words_total - self.words_assigned
    }
}

/// Attach word timestamps to slides by word count.
///
/// Each slide consumes as many words from the unconsumed prefix as its body has
/// whitespace-delimited tokens, clamped at the end of the list. Bounds come from the first and
/// last consumed word. A slide with no words gets `(0.0, 0.0)`. The final slide's end is then
/// forced to the last word's end so the audio tail is never cut off.
///
/// Fails only when `words` breaks the producer contract: negative or non-finite timestamps,
/// `end < start`, or a decreasing `start`.
pub fn align(slides: Vec<Slide>, words: &[Word]) -> SlideSyncResult<Vec<Slide>> {
    align_with_report(slides, words).map(|(slides, _)| slides)
}

/// [`align`] that also reports how many words were used.
#[tracing::instrument(skip(slides, words), fields(slides = slides.len(), words = words.len()))]
pub fn align_with_report(
    mut slides: Vec<Slide>,
    words: &[Word],
) -> SlideSyncResult<(Vec<Slide>, AlignReport)> {
    validate_words(words)?;

    let mut report = AlignReport {
        words_total: words.len(),
        ..AlignReport::default()
    };
    let mut cursor = 0usize;

    for slide in &mut slides {
        let take = slide.token_count().min(words.len() - cursor);
        let run = &words[cursor..cursor + take];
        cursor += take;

        slide.words = run.to_vec();
        match (run.first(), run.last()) {
            (Some(first), Some(last)) => {
                slide.start_time = first.start;
                slide.end_time = last.end;
            }
            _ => {
                slide.start_time = 0.0;
                slide.end_time = 0.0;
                report.slides_without_audio += 1;
            }
        }
        tracing::debug!(
            slide = slide.index,
            words = take,
            start = slide.start_time,
            end = slide.end_time,
            "aligned slide"
        );
    }
    report.words_assigned = cursor;

    if let (Some(last_slide), Some(last_word)) = (slides.last_mut(), words.last()) {
        last_slide.end_time = last_word.end;
    }

    if report.words_unassigned() > 0 {
        tracing::warn!(
            unassigned = report.words_unassigned(),
            "narration has fewer tokens than the audio; trailing words left unassigned"
        );
    }

    Ok((slides, report))
}

fn validate_words(words: &[Word]) -> SlideSyncResult<()> {
    let mut prev_start = 0.0f64;
    for (i, w) in words.iter().enumerate() {
        if !w.start.is_finite() || !w.end.is_finite() {
            return Err(SlideSyncError::empty_words(format!(
                "word {i} has a non-finite timestamp"
            )));
        }
        if w.start < 0.0 || w.end < 0.0 {
            return Err(SlideSyncError::empty_words(format!(
                "word {i} has a negative timestamp ({}, {})",
                w.start, w.end
            )));
        }
        if w.end < w.start {
            return Err(SlideSyncError::empty_words(format!(
                "word {i} ends before it starts ({} < {})",
                w.end, w.start
            )));
        }
        if w.start < prev_start {
            return Err(SlideSyncError::empty_words(format!(
                "word {i} starts at {} before the previous word ({prev_start})",
                w.start
            )));
        }
        prev_start = w.start;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timing/align.rs"]
mod tests;
