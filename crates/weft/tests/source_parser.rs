//! Integration tests for the entry-definition grammar parser.

use weft::parser::ast::Segment;
use weft::parser::{ParseError, parse_conditions, parse_entry, parse_source};

// =============================================================================
// Entry Structure
// =============================================================================

#[test]
fn parse_single_entry_without_attributes() {
    let defs = parse_source("greeting { Hello }").unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "greeting");
    assert!(defs[0].attributes.is_empty());
    assert_eq!(defs[0].body, vec![Segment::Literal("Hello".to_string())]);
}

#[test]
fn parse_entry_with_attribute_block() {
    let defs = parse_source("sword {masc} { sword }").unwrap();
    assert_eq!(defs[0].attributes, vec!["masc".to_string()]);
    assert_eq!(defs[0].body, vec![Segment::Literal("sword".to_string())]);
}

#[test]
fn lone_block_is_body_even_if_it_looks_like_attributes() {
    // `{masc}` followed by another entry name, not a `{`, so it is the body.
    let defs = parse_source("e {masc} f {x}").unwrap();
    assert_eq!(defs.len(), 2);
    assert!(defs[0].attributes.is_empty());
    assert_eq!(defs[0].body, vec![Segment::Literal("masc".to_string())]);
    assert_eq!(defs[1].name, "f");
}

#[test]
fn parse_entry_returns_remaining_source() {
    let src = "a { one } b { two }";
    let (def, rest) = parse_entry(src, src).unwrap();
    assert_eq!(def.name, "a");
    assert_eq!(rest.trim_start(), "b { two }");

    let (def, rest) = parse_entry(src, rest).unwrap();
    assert_eq!(def.name, "b");
    assert!(rest.trim().is_empty());
}

#[test]
fn parse_multiple_entries() {
    let defs = parse_source(
        "
        hello { Hello }
        bye { Bye }
        ",
    )
    .unwrap();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "hello");
    assert_eq!(defs[1].name, "bye");
}

// =============================================================================
// Whitespace Normalization
// =============================================================================

#[test]
fn interior_whitespace_collapses() {
    let defs = parse_source("e {  a   b\r\nc  }").unwrap();
    assert_eq!(defs[0].body, vec![Segment::Literal("a b\nc".to_string())]);
}

#[test]
fn newline_run_collapses_to_one_newline() {
    let defs = parse_source("e { a \r\n \r\n b }").unwrap();
    assert_eq!(defs[0].body, vec![Segment::Literal("a\nb".to_string())]);
}

#[test]
fn joiner_deletes_adjacent_whitespace() {
    let defs = parse_source("e { a _ b }").unwrap();
    assert_eq!(defs[0].body, vec![Segment::Literal("ab".to_string())]);
}

#[test]
fn joiner_around_inline_command() {
    let defs = parse_source(r"e {a_\it{ b }_c}").unwrap();
    assert_eq!(
        defs[0].body,
        vec![
            Segment::Literal("a".to_string()),
            Segment::Italic(vec![Segment::Literal("b".to_string())]),
            Segment::Literal("c".to_string()),
        ]
    );
}

#[test]
fn nested_blocks_normalize_independently() {
    let defs = parse_source(r"e { x \it{  inner   text  } y }").unwrap();
    assert_eq!(
        defs[0].body,
        vec![
            Segment::Literal("x ".to_string()),
            Segment::Italic(vec![Segment::Literal("inner text".to_string())]),
            Segment::Literal(" y".to_string()),
        ]
    );
}

// =============================================================================
// Inline Commands
// =============================================================================

#[test]
fn parameter_placeholder_is_zero_based() {
    let defs = parse_source(r"e {x \1 y}").unwrap();
    assert_eq!(
        defs[0].body,
        vec![
            Segment::Literal("x ".to_string()),
            Segment::Param(0),
            Segment::Literal(" y".to_string()),
        ]
    );
}

#[test]
fn multi_digit_parameter_placeholder() {
    let defs = parse_source(r"e {\12}").unwrap();
    assert_eq!(defs[0].body, vec![Segment::Param(11)]);
}

#[test]
fn font_command() {
    let defs = parse_source(r"e { \font{heading} Title }").unwrap();
    assert_eq!(
        defs[0].body,
        vec![
            Segment::Font("heading".to_string()),
            Segment::Literal(" Title".to_string()),
        ]
    );
}

#[test]
fn match_command_with_fallback() {
    let defs = parse_source(r"e { \match{1.other}{A}{}{B} }").unwrap();
    let Segment::Match(arms) = &defs[0].body[0] else {
        panic!("expected a match segment, got {:?}", defs[0].body);
    };
    assert_eq!(arms.len(), 2);
    assert_eq!(arms[0].conditions.len(), 1);
    assert_eq!(arms[0].conditions[0].param, 0);
    assert_eq!(arms[0].conditions[0].attribute, "other");
    assert!(arms[1].conditions.is_empty());
    assert_eq!(arms[1].body, vec![Segment::Literal("B".to_string())]);
}

#[test]
fn literal_escapes() {
    let defs = parse_source(r"e { \{ \} \\ \_ }").unwrap();
    assert_eq!(defs[0].body, vec![Segment::Literal("{ } \\ _".to_string())]);
}

// =============================================================================
// Condition Blocks
// =============================================================================

#[test]
fn conditions_consume_exactly_the_block() {
    let src = "{1.other 2.masc} rest";
    let (conditions, rest) = parse_conditions(src, src).unwrap();
    assert_eq!(rest, " rest");
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0].param, 0);
    assert_eq!(conditions[0].attribute, "other");
    assert_eq!(conditions[1].param, 1);
    assert_eq!(conditions[1].attribute, "masc");
}

#[test]
fn empty_condition_block() {
    let src = "{}x";
    let (conditions, rest) = parse_conditions(src, src).unwrap();
    assert!(conditions.is_empty());
    assert_eq!(rest, "x");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unterminated_body_block() {
    let err = parse_source("e { abc").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnterminatedBlock { line: 1, column: 3 }
    ));
}

#[test]
fn unterminated_italic_block() {
    let err = parse_source(r"e { \it{abc }").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedBlock { .. }));
}

#[test]
fn parameter_index_zero_is_invalid() {
    let err = parse_source(r"e { \0 }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidParameterIndex { index: 0, .. }
    ));
}

#[test]
fn unknown_command_suggests_known_ones() {
    let err = parse_source(r"e { \matc{1.one}{a}{}{b} }").unwrap_err();
    let ParseError::UnknownCommand {
        name, suggestions, ..
    } = err
    else {
        panic!("expected UnknownCommand, got {err:?}");
    };
    assert_eq!(name, "matc");
    assert!(suggestions.contains(&"match".to_string()));
}

#[test]
fn match_condition_without_alternative() {
    let err = parse_source(r"e { \match{1.one} }").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn bare_open_brace_in_body() {
    let err = parse_source("e { a { b } }").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn zero_in_condition_is_invalid() {
    let err = parse_source(r"e { \match{0.one}{a}{}{b} }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidParameterIndex { index: 0, .. }
    ));
}
