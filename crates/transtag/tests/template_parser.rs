//! Integration tests for whole-template parsing.

use transtag::parser::{BlockPart, Expression, Node, ParsedTag, parse_template};

// =============================================================================
// Basic parsing
// =============================================================================

#[test]
fn pure_text() {
    let t = parse_template("Hello, world!").unwrap();
    assert_eq!(t.nodes, vec![Node::Text("Hello, world!".into())]);
}

#[test]
fn empty_template() {
    let t = parse_template("").unwrap();
    assert_eq!(t.nodes, vec![]);
}

#[test]
fn text_and_variables() {
    let t = parse_template("Hi {{ name }}, you have {{ count }} items").unwrap();
    assert_eq!(
        t.nodes,
        vec![
            Node::Text("Hi ".into()),
            Node::Variable("name".into()),
            Node::Text(", you have ".into()),
            Node::Variable("count".into()),
            Node::Text(" items".into()),
        ]
    );
}

#[test]
fn comments_are_dropped_and_text_merged() {
    let t = parse_template("a{# hidden #}b").unwrap();
    assert_eq!(t.nodes, vec![Node::Text("ab".into())]);
}

#[test]
fn load_tag_produces_no_node() {
    let t = parse_template("{% load rd_i18n %}\n<p>x</p>").unwrap();
    assert_eq!(t.nodes, vec![Node::Text("\n<p>x</p>".into())]);
}

// =============================================================================
// Translation tags
// =============================================================================

#[test]
fn all_three_tags() {
    let source = concat!(
        "{% get_current_language as lang %}",
        "<h1>{% trans \"title\" %}</h1>",
        "{% blocktrans %}Hi {{ name }}{% endblocktrans %}",
    );
    let t = parse_template(source).unwrap();
    assert_eq!(
        t.nodes,
        vec![
            Node::Tag(ParsedTag::CurrentLanguage {
                output_variable: "lang".into()
            }),
            Node::Text("<h1>".into()),
            Node::Tag(ParsedTag::Translate {
                source: Expression::Literal("title".into()),
                output_variable: None,
            }),
            Node::Text("</h1>".into()),
            Node::Tag(ParsedTag::BlockTranslate {
                body: vec![
                    BlockPart::Literal("Hi ".into()),
                    BlockPart::Placeholder("name".into()),
                ]
            }),
        ]
    );
}

#[test]
fn text_after_block_translate_is_kept() {
    let t = parse_template("{% blocktrans %}x{% endblocktrans %} tail").unwrap();
    assert_eq!(t.nodes.len(), 2);
    assert_eq!(t.nodes[1], Node::Text(" tail".into()));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unknown_block_tag_is_an_error() {
    let err = parse_template("ok\n{% if user %}yes{% endif %}").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"syntax error at 2:1: Invalid block tag on line 2: 'if'"
    );
}

#[test]
fn stray_end_marker_is_an_error() {
    let err = parse_template("{% endblocktrans %}").unwrap_err();
    assert_eq!(err.message(), "Invalid block tag on line 1: 'endblocktrans'");
}

#[test]
fn empty_block_tag_is_an_error() {
    let err = parse_template("{%  %}").unwrap_err();
    assert_eq!(err.message(), "Empty block tag on line 1");
}

#[test]
fn empty_variable_is_an_error() {
    let err = parse_template("a {{ }} b").unwrap_err();
    assert_eq!(err.message(), "Empty variable tag on line 1");
}

#[test]
fn variable_with_filter_is_an_error() {
    let err = parse_template("{{ name|upper }}").unwrap_err();
    assert_eq!(err.message(), "Could not parse the remainder: 'name|upper'");
}

#[test]
fn tag_errors_propagate() {
    let err = parse_template("{% trans %}").unwrap_err();
    assert_eq!(err.message(), "'trans' takes at least one argument");
}

#[test]
fn unclosed_delimiter_propagates() {
    let err = parse_template("Hello {% trans \"x\"").unwrap_err();
    assert_eq!((err.line(), err.column()), (1, 7));
}
