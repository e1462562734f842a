//! Tests for a single expansion pass.

use super::*;

fn scope<'p>(pairs: &[(&'p str, &'p str)]) -> Scope<'p> {
    Scope::new(pairs.iter().copied())
}

#[test]
fn test_bare_reference() {
    let scope = scope(&[("FOO", "BAZ")]);
    assert_eq!(expand("echo $$FOO $BAR", &scope), "echo BAZ $BAR");
}

#[test]
fn test_single_dollar_is_literal() {
    let scope = scope(&[("FOO", "BAZ")]);
    assert_eq!(expand("echo $FOO ${FOO}", &scope), "echo $FOO ${FOO}");
}

#[test]
fn test_unbound_reference_is_kept() {
    let scope = scope(&[("FOO", "BAZ")]);
    assert_eq!(expand("$$OTHER $${OTHER:2}", &scope), "$$OTHER $${OTHER:2}");
}

#[test]
fn test_longest_name_wins_for_bare_reference() {
    let scope = scope(&[("TAG", "v1"), ("TAG_SHORT", "1")]);
    assert_eq!(expand("$$TAG_SHORT $$TAG", &scope), "1 v1");
}

#[test]
fn test_shorter_name_matches_prefix_of_unbound_name() {
    let scope = scope(&[("TAG", "v1")]);
    assert_eq!(expand("$$TAG_SHORT", &scope), "v1_SHORT");
}

#[test]
fn test_braced_name_must_be_followed_by_operator() {
    let scope = scope(&[("TAG", "v1")]);
    assert_eq!(expand("$${TAG_SHORT}", &scope), "$${TAG_SHORT}");
    assert_eq!(expand("$${TAG}", &scope), "v1");
}

#[test]
fn test_braced_prefers_longer_bound_name() {
    let scope = scope(&[("A", "short"), ("A_B", "long")]);
    assert_eq!(expand("$${A_B=x} $${A=x}", &scope), "long short");
}

#[test]
fn test_newlines_escaped_inside_double_quotes() {
    let scope = scope(&[("FOO", "hello\nworld")]);
    assert_eq!(expand("echo \"$$FOO\"", &scope), "echo \"hello\\nworld\"");
    assert_eq!(expand("echo \"x $$FOO y\"", &scope), "echo \"x hello\\nworld y\"");
}

#[test]
fn test_newlines_kept_outside_double_quotes() {
    let scope = scope(&[("FOO", "hello\nworld")]);
    assert_eq!(expand("echo $$FOO", &scope), "echo hello\nworld");
    assert_eq!(expand("\"closed\" $$FOO", &scope), "\"closed\" hello\nworld");
}

#[test]
fn test_escaped_quote_does_not_close_run() {
    let scope = scope(&[("FOO", "a\nb")]);
    assert_eq!(
        expand("\"say \\\"hi\\\" $$FOO\"", &scope),
        "\"say \\\"hi\\\" a\\nb\""
    );
}

#[test]
fn test_newline_ends_quoted_run() {
    let scope = scope(&[("FOO", "a\nb")]);
    assert_eq!(expand("\"open\n$$FOO", &scope), "\"open\na\nb");
}

#[test]
fn test_quote_state_skips_substituted_values() {
    let scope = scope(&[("Q", "\""), ("FOO", "a\nb")]);
    assert_eq!(expand("$$Q $$FOO", &scope), "\" a\nb");
}

#[test]
fn test_unbalanced_braces_are_left_alone() {
    let scope = scope(&[("FOO", "BAZ")]);
    assert_eq!(expand("$${FOO and $$FOO", &scope), "$${FOO and BAZ");
}

#[test]
fn test_unknown_operator_is_left_alone() {
    let scope = scope(&[("FOO", "BAZ")]);
    assert_eq!(expand("$${FOO^^}", &scope), "$${FOO^^}");
}

#[test]
fn test_nested_default_with_both_names_in_scope() {
    let scope = scope(&[("TAG", ""), ("SHA", "f36cbf54ee1a1eeab264c8e388f386218ab1701b")]);
    assert_eq!(expand("tag: $${TAG=$${SHA:8}}", &scope), "tag: f36cbf54");
}

#[test]
fn test_nested_occurrence_inside_unbound_outer() {
    let scope = scope(&[("SHA", "f36cbf54ee")]);
    assert_eq!(
        expand("$${TAG=$${SHA:4}}", &scope),
        "$${TAG=f36c}"
    );
}

#[test]
fn test_inserted_values_are_not_rescanned() {
    let scope = scope(&[("A", "$$B"), ("B", "nope")]);
    assert_eq!(expand("$$A", &scope), "$$B");
}

#[test]
fn test_empty_names_are_never_bound() {
    let scope = scope(&[("", "boom")]);
    assert_eq!(expand("$$ $${}", &scope), "$$ $${}");
}

#[test]
fn test_multibyte_text_around_occurrences() {
    let scope = scope(&[("NAME", "wörld")]);
    assert_eq!(expand("héllo $$NAME ✓", &scope), "héllo wörld ✓");
}

#[test]
fn test_quotes_and_backslashes_escaped_inside_double_quotes() {
    let scope = scope(&[("FOO", "a\"b\\c")]);
    assert_eq!(expand("k: \"$$FOO\"", &scope), "k: \"a\\\"b\\\\c\"");
    assert_eq!(expand("k: $$FOO", &scope), "k: a\"b\\c");
}

#[test]
fn test_single_quoted_run_gets_value_as_is() {
    let scope = scope(&[("FOO", "a\nb")]);
    assert_eq!(expand("'$$FOO'", &scope), "'a\nb'");
}

#[test]
fn test_overlapping_sigil_is_retried() {
    let scope = scope(&[("FOO", "BAZ")]);
    assert_eq!(expand("$$$FOO", &scope), "$BAZ");
    assert_eq!(expand("$$$${FOO}", &scope), "$$BAZ");
}

#[test]
fn test_deep_nesting_of_bound_name_is_cut_off() {
    let levels = 10_000;
    let text = format!("{}x{}", "$${A=".repeat(levels), "}".repeat(levels));
    let scope = scope(&[("A", "")]);

    let kept = levels - MAX_NESTING;
    assert_eq!(
        expand(&text, &scope),
        format!("{}x{}", "$${A=".repeat(kept), "}".repeat(kept))
    );
}

#[test]
fn test_deep_nesting_of_unbound_name_is_kept() {
    let levels = 10_000;
    let text = format!("{}x{}", "$${B=".repeat(levels), "}".repeat(levels));
    let scope = scope(&[("A", "value")]);

    assert_eq!(expand(&text, &scope), text);
}

#[test]
fn test_unbalanced_deep_nesting_is_kept() {
    let text = "$${A=".repeat(10_000);
    let scope = scope(&[("A", "")]);

    assert_eq!(expand(&text, &scope), text);
}
