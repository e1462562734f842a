//! Tests for the ordered document model.

use super::*;

fn sample_document() -> Document {
    Document::new(vec![
        Entry::new(Node::scalar("Build"), Node::scalar("first")),
        Entry::new(Node::scalar("deploy"), Node::scalar("second")),
        Entry::new(Node::scalar("build"), Node::scalar("third")),
    ])
}

#[test]
fn test_position_ci_matches_case_insensitively() {
    let doc = sample_document();

    assert_eq!(doc.position_ci("build"), Some(0));
    assert_eq!(doc.position_ci("BUILD"), Some(0));
    assert_eq!(doc.position_ci("Deploy"), Some(1));
    assert_eq!(doc.position_ci("notify"), None);
}

#[test]
fn test_find_ci_returns_first_duplicate() {
    let doc = sample_document();

    let entry = doc.find_ci("build").expect("build entry");
    assert_eq!(entry.value.as_str(), Some("first"));
}

#[test]
fn test_get_is_case_sensitive() {
    let doc = sample_document();

    assert_eq!(doc.get("build").and_then(Node::as_str), Some("third"));
    assert_eq!(doc.get("Build").and_then(Node::as_str), Some("first"));
    assert!(doc.get("BUILD").is_none());
}

#[test]
fn test_collection_keys_have_no_name() {
    let entry = Entry::new(
        Node::sequence(vec![Node::scalar("a")]),
        Node::scalar("value"),
    );

    assert_eq!(entry.key_name(), None);

    let doc = Document::new(vec![entry]);
    assert_eq!(doc.position_ci("a"), None);
}

#[test]
fn test_node_get_on_nested_mapping() {
    let node = Node::mapping(vec![
        Entry::new(Node::scalar("image"), Node::scalar("golang")),
        Entry::new(
            Node::scalar("commands"),
            Node::sequence(vec![Node::scalar("go test")]),
        ),
    ]);

    assert_eq!(node.get("image").and_then(Node::as_str), Some("golang"));
    assert_eq!(
        node.get("commands")
            .and_then(Node::as_sequence)
            .map(|items| items.len()),
        Some(1)
    );
    assert!(node.get("missing").is_none());
    assert!(Node::scalar("x").get("image").is_none());
}

#[test]
fn test_node_kind() {
    assert_eq!(Node::scalar("x").kind(), "scalar");
    assert_eq!(Node::sequence(vec![]).kind(), "sequence");
    assert_eq!(Node::mapping(vec![]).kind(), "mapping");
}

#[test]
fn test_tag_shorthand() {
    let core = Tag {
        handle: "tag:yaml.org,2002:".to_string(),
        suffix: "str".to_string(),
    };
    let local = Tag {
        handle: "!".to_string(),
        suffix: "secret".to_string(),
    };
    let verbatim = Tag {
        handle: "tag:example.com,2000:".to_string(),
        suffix: "app".to_string(),
    };

    assert_eq!(core.to_shorthand(), "!!str");
    assert_eq!(local.to_shorthand(), "!secret");
    assert_eq!(verbatim.to_shorthand(), "!<tag:example.com,2000:app>");
}
