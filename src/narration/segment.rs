use std::sync::LazyLock;

use regex::Regex;

use crate::{
    foundation::core::collapse_whitespace,
    foundation::error::{SlideSyncError, SlideSyncResult},
    narration::slide::Slide,
};

/// Title given to the single slide produced from header-less narration.
pub const DEFAULT_SLIDE_TITLE: &str = "Slide 1:";

// At line start the colon is optional; mid-line, only "Slide N:" with its colon is a header.
static SLIDE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)(?:^[ \t]*slide\s+\d+\s*:?|\bslide\s+\d+\s*:)")
        .expect("slide header pattern is a valid regex")
});

/// Split raw narration into ordered slides.
///
/// Headers of the form `Slide N:` (case-insensitive) start a new slide. The colon may be omitted
/// when the header opens a line; a mid-line `slide N` without a colon is ordinary narration. Text
/// before the first header is folded into the first slide's body. Bodies are whitespace-collapsed
/// and trimmed. Indices are positional and never taken from the header number, so duplicated or
/// out-of-order headers still yield `0..n`.
///
/// Narration with no headers becomes exactly one slide titled [`DEFAULT_SLIDE_TITLE`] whose body
/// is the whole input, whitespace-collapsed.
#[tracing::instrument(skip(raw_text), fields(len = raw_text.len()))]
pub fn segment(raw_text: &str) -> SlideSyncResult<Vec<Slide>> {
    if raw_text.trim().is_empty() {
        return Err(SlideSyncError::empty_input(
            "narration text is empty or whitespace-only",
        ));
    }

    let headers: Vec<regex::Match<'_>> = SLIDE_HEADER.find_iter(raw_text).collect();
    let Some(first) = headers.first() else {
        tracing::debug!("no slide headers found; using whole narration as one slide");
        return Ok(vec![Slide::new(
            0,
            DEFAULT_SLIDE_TITLE,
            collapse_whitespace(raw_text),
        )]);
    };

    let leading = collapse_whitespace(&raw_text[..first.start()]);

    let mut slides = Vec::with_capacity(headers.len());
    for (i, header) in headers.iter().enumerate() {
        let body_end = headers
            .get(i + 1)
            .map_or(raw_text.len(), |next| next.start());
        let mut body = collapse_whitespace(&raw_text[header.end()..body_end]);

        if i == 0 && !leading.is_empty() {
            body = if body.is_empty() {
                leading.clone()
            } else {
                format!("{leading} {body}")
            };
        }

        slides.push(Slide::new(i, normalize_title(header.as_str()), body));
    }

    tracing::debug!(slides = slides.len(), "segmented narration");
    Ok(slides)
}

/// `"SLIDE   3 :"` -> `"SLIDE 3:"`.
fn normalize_title(header: &str) -> String {
    let core = collapse_whitespace(header.trim_end().trim_end_matches(':'));
    format!("{core}:")
}

#[cfg(test)]
#[path = "../../tests/unit/narration/segment.rs"]
mod tests;
