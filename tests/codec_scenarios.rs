//! Table-driven codec scenarios
//!
//! One case per expression tag, plus parse-result shapes, error taxonomy
//! checks, and order-preservation checks. Each expression case asserts both
//! directions at once: the fixture decodes to the expected value and the
//! value encodes back to the identical fixture.

use rstest::rstest;
use serde_json::{json, Value};

use pegcheck::peg::expr::{CharClassElement, Expr};
use pegcheck::peg::fixture::{
    decode_err_char, decode_expr, decode_parse_result, encode_expr, encode_parse_result,
    FixtureError,
};
use pegcheck::peg::result::{Ast, ExpectedChar, ParseError, ParseResult};

#[rstest]
#[case::nt(json!(["NT", "Number"]), Expr::nt("Number"))]
#[case::alt(
    json!(["ALT", ["CHAR", "a"], ["CHAR", "b"]]),
    Expr::alt(vec![Expr::char('a'), Expr::char('b')])
)]
#[case::seq(
    json!(["SEQ", ["CHAR", "a"], ["ANY_CHAR"]]),
    Expr::seq(vec![Expr::char('a'), Expr::AnyChar])
)]
#[case::char(json!(["CHAR", "x"]), Expr::char('x'))]
#[case::char_class(
    json!(["CHAR_CLASS", "a", ["0", "9"]]),
    Expr::char_class(vec![
        CharClassElement::Single('a'),
        CharClassElement::Range('0', '9'),
    ])
)]
#[case::plus(json!(["PLUS", ["ANY_CHAR"]]), Expr::plus(Expr::AnyChar))]
#[case::star(json!(["STAR", ["CHAR", "a"]]), Expr::star(Expr::char('a')))]
#[case::opt(json!(["OPT", ["NT", "Sign"]]), Expr::opt(Expr::nt("Sign")))]
#[case::and(json!(["AND", ["CHAR", "a"]]), Expr::and(Expr::char('a')))]
#[case::not(json!(["NOT", ["CHAR", "a"]]), Expr::not(Expr::char('a')))]
#[case::void(json!(["VOID", ["NT", "Ws"]]), Expr::void(Expr::nt("Ws")))]
#[case::any_char(json!(["ANY_CHAR"]), Expr::AnyChar)]
fn expression_fixture_and_value_are_inverse(#[case] fixture: Value, #[case] expr: Expr) {
    assert_eq!(decode_expr(&fixture).unwrap(), expr);
    assert_eq!(encode_expr(&expr), fixture);
}

#[rstest]
#[case::nested_unary(
    json!(["NOT", ["PLUS", ["CHAR", "z"]]]),
    Expr::not(Expr::plus(Expr::char('z')))
)]
#[case::unicode_char(json!(["CHAR", "é"]), Expr::char('é'))]
#[case::unicode_range(
    json!(["CHAR_CLASS", ["α", "ω"]]),
    Expr::char_class(vec![CharClassElement::Range('α', 'ω')])
)]
fn nested_and_unicode_expressions_round_trip(#[case] fixture: Value, #[case] expr: Expr) {
    assert_eq!(decode_expr(&fixture).unwrap(), expr);
    assert_eq!(encode_expr(&expr), fixture);
}

#[test]
fn seq_decoding_preserves_argument_order() {
    let fixture = json!(["SEQ", ["CHAR", "a"], ["CHAR", "b"], ["CHAR", "c"]]);
    match decode_expr(&fixture).unwrap() {
        Expr::Seq { exprs } => {
            assert_eq!(
                exprs,
                vec![Expr::char('a'), Expr::char('b'), Expr::char('c')]
            );
        }
        other => panic!("Expected Seq, got {:?}", other),
    }
}

#[test]
fn char_class_decoding_preserves_declaration_order() {
    // Declaration order carries first-match semantics; duplicates stay.
    let fixture = json!(["CHAR_CLASS", "z", ["0", "9"], "z"]);
    match decode_expr(&fixture).unwrap() {
        Expr::CharClass { ranges } => {
            assert_eq!(
                ranges,
                vec![
                    CharClassElement::Single('z'),
                    CharClassElement::Range('0', '9'),
                    CharClassElement::Single('z'),
                ]
            );
        }
        other => panic!("Expected CharClass, got {:?}", other),
    }
}

#[test]
fn tree_fixture_decodes_to_ast_with_char_and_empty_children() {
    let result = decode_parse_result(&json!(["Tree", "S", [["Char", "a"], ["Empty"]]])).unwrap();
    assert_eq!(
        result,
        ParseResult::Ast(Ast::tree("S", vec![Ast::Char('a'), Ast::Empty]))
    );
}

#[test]
fn nested_tree_fixture_round_trips() {
    let fixture = json!([
        "Tree",
        "Sum",
        [
            ["Tree", "Num", [["Char", "4"], ["Char", "2"]]],
            ["Char", "+"],
            ["Tree", "Num", [["Char", "1"]]]
        ]
    ]);
    let result = decode_parse_result(&fixture).unwrap();
    assert_eq!(encode_parse_result(&result), fixture);
}

#[test]
fn parse_error_fixture_decodes_and_encodes_identically() {
    let fixture = json!(["ParseError", 3, 1, 4, "S", [{"type": "ErrAny"}]]);
    let result = decode_parse_result(&fixture).unwrap();
    assert_eq!(
        result,
        ParseResult::Error(ParseError::new(3, 1, 4, "S", vec![ExpectedChar::Any]))
    );
    assert_eq!(encode_parse_result(&result), fixture);
}

#[test]
fn parse_error_evidence_preserves_order() {
    let fixture = json!([
        "ParseError", 0, 1, 1, "S",
        [
            {"type": "ErrCC", "arg": [["a", "z"]]},
            {"type": "ErrChar", "arg": ";"},
            {"type": "ErrAny"}
        ]
    ]);
    match decode_parse_result(&fixture).unwrap() {
        ParseResult::Error(err) => {
            assert_eq!(
                err.chars,
                vec![
                    ExpectedChar::Class(vec![CharClassElement::Range('a', 'z')]),
                    ExpectedChar::Char(';'),
                    ExpectedChar::Any,
                ]
            );
        }
        other => panic!("Expected an error result, got {:?}", other),
    }
}

#[rstest]
#[case::lowercase_tag(json!(["char", "x"]), "char")]
#[case::typo(json!(["CHARS", "x"]), "CHARS")]
#[case::result_tag_in_expr_position(json!(["Tree", "S", []]), "Tree")]
fn unknown_expression_tags_are_rejected(#[case] fixture: Value, #[case] tag: &str) {
    assert_eq!(
        decode_expr(&fixture).unwrap_err(),
        FixtureError::UnknownExprType(tag.to_string())
    );
}

#[rstest]
#[case::typo(json!(["Leaf", "x"]), "Leaf")]
#[case::expr_tag_in_result_position(json!(["CHAR", "x"]), "CHAR")]
fn unknown_result_tags_are_rejected(#[case] fixture: Value, #[case] tag: &str) {
    assert_eq!(
        decode_parse_result(&fixture).unwrap_err(),
        FixtureError::UnsupportedFixtureNode(tag.to_string())
    );
}

#[test]
fn unknown_err_char_discriminator_is_rejected() {
    assert_eq!(
        decode_err_char(&json!({"type": "ErrEof"})).unwrap_err(),
        FixtureError::UnsupportedErrChar("ErrEof".to_string())
    );
}

#[rstest]
#[case::unary_without_argument(json!(["STAR"]))]
#[case::empty_alt(json!(["ALT"]))]
#[case::nt_without_name(json!(["NT"]))]
#[case::missing_tag(json!([]))]
#[case::numeric_tag(json!([42, "x"]))]
#[case::bare_string(json!("CHAR"))]
#[case::empty_char(json!(["CHAR", ""]))]
#[case::triple_range(json!(["CHAR_CLASS", ["a", "b", "c"]]))]
fn malformed_expression_fixtures_are_rejected(#[case] fixture: Value) {
    assert!(matches!(
        decode_expr(&fixture).unwrap_err(),
        FixtureError::MalformedFixture(_)
    ));
}

#[rstest]
#[case::error_missing_evidence(json!(["ParseError", 3, 1, 4, "S"]))]
#[case::error_with_string_position(json!(["ParseError", "3", 1, 4, "S", []]))]
#[case::tree_without_children(json!(["Tree", "S"]))]
fn malformed_result_fixtures_are_rejected(#[case] fixture: Value) {
    assert!(matches!(
        decode_parse_result(&fixture).unwrap_err(),
        FixtureError::MalformedFixture(_)
    ));
}
