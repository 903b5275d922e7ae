use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlideSyncError::empty_input("x")
            .to_string()
            .contains("empty input:")
    );
    assert!(
        SlideSyncError::empty_words("x")
            .to_string()
            .contains("word timeline error:")
    );
    assert!(
        SlideSyncError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlideSyncError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        SlideSyncError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideSyncError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = SlideSyncError::from(err);
    assert!(matches!(err, SlideSyncError::Serde(_)));
}
