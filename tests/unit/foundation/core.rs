use super::*;

#[test]
fn time_span_duration() {
    let s = TimeSpan {
        start: 1.0,
        end: 3.5,
    };
    assert_eq!(s.duration(), 2.5);
    assert!(!s.is_zero());
}

#[test]
fn duration_floor_applies_to_zero_span() {
    assert!(TimeSpan::ZERO.is_zero());
    assert_eq!(TimeSpan::ZERO.duration_at_least(0.5), 0.5);
    assert_eq!(
        TimeSpan {
            start: 0.0,
            end: 2.0,
        }
        .duration_at_least(0.5),
        2.0
    );
}

#[test]
fn frame_id_file_names_sort_lexically() {
    let a = FrameId { slide: 2, step: 9 }.file_name("png");
    let b = FrameId { slide: 10, step: 0 }.file_name("png");
    assert_eq!(a, "slide_002_frame_09.png");
    assert!(a < b);
}

#[test]
fn collapse_whitespace_trims_and_joins() {
    assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
    assert_eq!(collapse_whitespace(" \n "), "");
}

#[test]
fn word_deserializes_without_text() {
    let w: Word = serde_json::from_str(r#"{"start":0.5,"end":1.0}"#).unwrap();
    assert_eq!(w, Word::new("", 0.5, 1.0));
}
