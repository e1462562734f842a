//! Tests for injection errors.

use super::*;

fn scan_error() -> ordered_yaml::Error {
    ordered_yaml::Error::Scan {
        message: "unexpected end of stream".to_string(),
    }
}

#[test]
fn test_parse_error_display_names_stage() {
    let err = InjectError::parse(ParseStage::Substituted, scan_error(), "a: b");
    assert_eq!(
        err.to_string(),
        "Failed to parse the substituted document: YAML syntax error: unexpected end of stream"
    );
}

#[test]
fn test_serialize_error_display() {
    let err = InjectError::Serialize {
        source: ordered_yaml::Error::Emit("formatter error".to_string()),
        original: "a: b".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Failed to serialize the injected document: Failed to emit YAML: formatter error"
    );
    assert_eq!(err.stage(), None);
}

#[test]
fn test_original_text_is_preserved() {
    let err = InjectError::parse(ParseStage::Original, scan_error(), "build: [");
    assert_eq!(err.stage(), Some(ParseStage::Original));
    assert_eq!(err.original_text(), "build: [");
    assert_eq!(err.into_original_text(), "build: [");
}

#[test]
fn test_source_is_exposed() {
    use std::error::Error as _;

    let err = InjectError::parse(ParseStage::Original, scan_error(), "");
    let source = err.source().map(|s| s.to_string());
    assert_eq!(
        source.as_deref(),
        Some("YAML syntax error: unexpected end of stream")
    );
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InjectError>();
}
