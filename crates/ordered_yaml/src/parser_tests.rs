//! Tests for building ordered documents from YAML text.

use super::*;

#[test]
fn test_parse_preserves_key_order() {
    let doc = parse("notify: a\nbuild: b\ndeploy: c\n").unwrap();

    let keys: Vec<&str> = doc.entries().iter().filter_map(Entry::key_name).collect();
    assert_eq!(keys, vec!["notify", "build", "deploy"]);
}

#[test]
fn test_parse_preserves_duplicate_keys() {
    let content = r#"
publish:
  amazon:
    token: one
  amazon:
    token: two
"#;
    let doc = parse(content).unwrap();

    let publish = doc.get("publish").and_then(Node::as_mapping).unwrap();
    assert_eq!(publish.len(), 2);
    assert_eq!(
        publish[0].value.get("token").and_then(Node::as_str),
        Some("one")
    );
    assert_eq!(
        publish[1].value.get("token").and_then(Node::as_str),
        Some("two")
    );
}

#[test]
fn test_parse_duplicate_top_level_keys() {
    let doc = parse("build: first\nbuild: second\n").unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.position_ci("build"), Some(0));
}

#[test]
fn test_parse_empty_input() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("# only a comment\n").unwrap().is_empty());
    assert!(parse("~").unwrap().is_empty());
}

#[test]
fn test_parse_rejects_top_level_sequence() {
    let err = parse("- a\n- b\n").unwrap_err();
    assert_eq!(
        err,
        Error::NotAMapping {
            found: "sequence".to_string()
        }
    );
}

#[test]
fn test_parse_rejects_top_level_scalar() {
    let err = parse("just text").unwrap_err();
    assert!(matches!(err, Error::NotAMapping { found } if found == "scalar"));
}

#[test]
fn test_parse_reports_syntax_errors() {
    let err = parse("build: a: b\n").unwrap_err();
    assert!(matches!(err, Error::Scan { .. }));
}

#[test]
fn test_parse_records_scalar_styles() {
    let content = "plain: a\nsingle: 'b'\ndouble: \"c\"\nliteral: |\n  d\nfolded: >\n  e\n";
    let doc = parse(content).unwrap();

    let style = |key: &str| match doc.get(key) {
        Some(Node::Scalar(scalar)) => scalar.style,
        other => panic!("expected scalar for {key}, got {other:?}"),
    };

    assert_eq!(style("plain"), ScalarStyle::Plain);
    assert_eq!(style("single"), ScalarStyle::SingleQuoted);
    assert_eq!(style("double"), ScalarStyle::DoubleQuoted);
    assert_eq!(style("literal"), ScalarStyle::Literal);
    assert_eq!(style("folded"), ScalarStyle::Folded);
}

#[test]
fn test_parse_empty_value_is_null_scalar() {
    let doc = parse("build:\n").unwrap();
    let value = doc.get("build").and_then(Node::as_str);
    assert!(matches!(value, Some("") | Some("~")), "got {value:?}");
}

#[test]
fn test_parse_resolves_aliases() {
    let content = r#"
defaults: &defaults
  image: golang
build: *defaults
"#;
    let doc = parse(content).unwrap();

    assert_eq!(doc.get("defaults"), doc.get("build"));
    assert_eq!(
        doc.get("build")
            .and_then(|n| n.get("image"))
            .and_then(Node::as_str),
        Some("golang")
    );
}

#[test]
fn test_parse_keeps_tags() {
    let doc = parse("token: !secret deploy_token\n").unwrap();

    let tag = doc.get("token").and_then(Node::tag).expect("tag");
    assert_eq!(tag.suffix, "secret");
    assert_eq!(tag.to_shorthand(), "!secret");
}

#[test]
fn test_parse_only_reads_first_document() {
    let doc = parse("a: 1\n---\nb: 2\n").unwrap();

    assert_eq!(doc.len(), 1);
    assert!(doc.get("a").is_some());
}
