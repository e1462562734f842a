//! Round-trip behaviour on realistic pipeline documents.

use ordered_yaml::{parse, to_string, Node};

const PIPELINE: &str = r#"
build:
  image: golang:1.22
  environment:
    - GOOS=linux
    - CGO_ENABLED=0
  commands:
    - go build ./...
    - go test ./...

compose:
  database:
    image: postgres:16
    environment:
      POSTGRES_PASSWORD: "hunter2"

deploy:
  heroku:
    app: demo-app
    when:
      branch: main

notify:
  slack:
    channel: '#builds'
    template: |
      build {{ build.number }} finished
      status: {{ build.status }}
"#;

#[test]
fn untouched_document_reemits_same_tree() {
    let original = parse(PIPELINE).expect("pipeline parses");
    let emitted = to_string(&original).expect("pipeline emits");
    let reparsed = parse(&emitted).expect("emitted text parses");

    assert_eq!(reparsed, original);
}

#[test]
fn emitting_twice_is_stable() {
    let first = to_string(&parse(PIPELINE).unwrap()).unwrap();
    let second = to_string(&parse(&first).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn top_level_order_survives_round_trip() {
    let emitted = to_string(&parse(PIPELINE).unwrap()).unwrap();
    let doc = parse(&emitted).unwrap();

    let keys: Vec<&str> = doc.entries().iter().filter_map(|e| e.key_name()).collect();
    assert_eq!(keys, vec!["build", "compose", "deploy", "notify"]);
}

#[test]
fn quoted_values_stay_strings() {
    let emitted = to_string(&parse(PIPELINE).unwrap()).unwrap();

    assert!(emitted.contains("POSTGRES_PASSWORD: \"hunter2\""));
    assert!(emitted.contains("channel: '#builds'"));

    let doc = parse(&emitted).unwrap();
    let template = doc
        .get("notify")
        .and_then(|n| n.get("slack"))
        .and_then(|n| n.get("template"))
        .and_then(Node::as_str)
        .unwrap();
    assert_eq!(
        template,
        "build {{ build.number }} finished\nstatus: {{ build.status }}\n"
    );
}
