//! Fixture codec
//!
//! Fixtures are compact literal values: tag-prefixed arrays such as
//! `["SEQ", ["CHAR", "a"], ["ANY_CHAR"]]` for expressions and
//! `["Tree", "S", [["Char", "a"], ["Empty"]]]` for parse results, with
//! failure evidence as `{"type": "ErrChar", "arg": "a"}` objects. This
//! module converts them to and from the typed model, in both directions,
//! without loss.
//!
//! Every decode dispatches on the leading tag and recurses over the rest
//! of the array; every encode is its exact inverse, reproducing tag strings
//! and argument order byte-for-byte. Character-class elements convert at
//! the codepoint level: a one-character string denotes its first codepoint,
//! a pair of one-character strings denotes an inclusive range.
//!
//! All conversions are pure and consult no external state; recursion depth
//! is bounded by fixture nesting depth.

use serde_json::{json, Value};
use std::fmt;

use super::expr::{CharClassElement, Expr};
use super::result::{Ast, ExpectedChar, ParseError, ParseResult};

/// Failures while decoding fixture data. All of these indicate a fixture
/// authoring bug and are surfaced to the caller immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureError {
    /// An expression fixture carried a tag outside the closed 12-variant set.
    UnknownExprType(String),
    /// A parse-result fixture carried an unrecognized tag.
    UnsupportedFixtureNode(String),
    /// Error evidence carried an unrecognized `type` discriminator.
    UnsupportedErrChar(String),
    /// A fixture is missing required positional elements or has the wrong
    /// shape for its tag.
    MalformedFixture(String),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::UnknownExprType(tag) => {
                write!(f, "Unknown expression type '{}'", tag)
            }
            FixtureError::UnsupportedFixtureNode(tag) => {
                write!(f, "Unsupported parse result node '{}'", tag)
            }
            FixtureError::UnsupportedErrChar(ty) => {
                write!(f, "Unsupported error evidence type '{}'", ty)
            }
            FixtureError::MalformedFixture(msg) => {
                write!(f, "Malformed fixture: {}", msg)
            }
        }
    }
}

impl std::error::Error for FixtureError {}

/// Decode an expression fixture into an [`Expr`].
///
/// The leading string tag selects the variant; the rest of the array is
/// decoded in order. Tags outside the closed set fail with
/// [`FixtureError::UnknownExprType`].
pub fn decode_expr(fixture: &Value) -> Result<Expr, FixtureError> {
    let items = as_array(fixture)?;
    let tag = leading_tag(items)?;
    match tag {
        "NT" => Ok(Expr::Nt {
            name: str_arg(items, 1, "NT")?.to_string(),
        }),
        "ALT" | "SEQ" => {
            let exprs = items[1..]
                .iter()
                .map(decode_expr)
                .collect::<Result<Vec<_>, _>>()?;
            if exprs.is_empty() {
                return Err(FixtureError::MalformedFixture(format!(
                    "{} requires at least one sub-expression",
                    tag
                )));
            }
            Ok(if tag == "ALT" {
                Expr::Alt { exprs }
            } else {
                Expr::Seq { exprs }
            })
        }
        "CHAR" => Ok(Expr::Char {
            char: char_arg(items, 1, "CHAR")?,
        }),
        "CHAR_CLASS" => {
            let ranges = items[1..]
                .iter()
                .map(decode_char_class_element)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::CharClass { ranges })
        }
        "PLUS" | "STAR" | "OPT" | "AND" | "NOT" | "VOID" => {
            let inner = decode_expr(arg(items, 1, tag)?)?;
            Ok(match tag {
                "PLUS" => Expr::plus(inner),
                "STAR" => Expr::star(inner),
                "OPT" => Expr::opt(inner),
                "AND" => Expr::and(inner),
                "NOT" => Expr::not(inner),
                _ => Expr::void(inner),
            })
        }
        "ANY_CHAR" => Ok(Expr::AnyChar),
        other => Err(FixtureError::UnknownExprType(other.to_string())),
    }
}

/// Encode an [`Expr`] into its fixture form, the exact inverse of
/// [`decode_expr`].
pub fn encode_expr(expr: &Expr) -> Value {
    match expr {
        Expr::Nt { name } => json!(["NT", name]),
        Expr::Alt { exprs } => tagged_exprs("ALT", exprs),
        Expr::Seq { exprs } => tagged_exprs("SEQ", exprs),
        Expr::Char { char } => json!(["CHAR", char.to_string()]),
        Expr::CharClass { ranges } => {
            let mut items = vec![Value::from("CHAR_CLASS")];
            items.extend(ranges.iter().map(encode_char_class_element));
            Value::Array(items)
        }
        Expr::Plus { expr } => json!(["PLUS", encode_expr(expr)]),
        Expr::Star { expr } => json!(["STAR", encode_expr(expr)]),
        Expr::Opt { expr } => json!(["OPT", encode_expr(expr)]),
        Expr::And { expr } => json!(["AND", encode_expr(expr)]),
        Expr::Not { expr } => json!(["NOT", encode_expr(expr)]),
        Expr::Void { expr } => json!(["VOID", encode_expr(expr)]),
        Expr::AnyChar => json!(["ANY_CHAR"]),
    }
}

/// Decode one character-class element: a one-character string is a single
/// codepoint, a pair of one-character strings is an inclusive range.
pub fn decode_char_class_element(element: &Value) -> Result<CharClassElement, FixtureError> {
    match element {
        Value::String(s) => Ok(CharClassElement::Single(first_char(s)?)),
        Value::Array(pair) => match pair.as_slice() {
            [lo, hi] => {
                let lo = first_char(string_of(lo, "char class range bound")?)?;
                let hi = first_char(string_of(hi, "char class range bound")?)?;
                Ok(CharClassElement::Range(lo, hi))
            }
            _ => Err(FixtureError::MalformedFixture(format!(
                "char class range must be a two-element pair, got {} elements",
                pair.len()
            ))),
        },
        other => Err(FixtureError::MalformedFixture(format!(
            "char class element must be a string or a pair, got {}",
            other
        ))),
    }
}

/// Encode one character-class element, the exact inverse of
/// [`decode_char_class_element`].
pub fn encode_char_class_element(element: &CharClassElement) -> Value {
    match element {
        CharClassElement::Single(c) => Value::String(c.to_string()),
        CharClassElement::Range(lo, hi) => json!([lo.to_string(), hi.to_string()]),
    }
}

/// Decode a success-tree fixture (`Tree`, `Char` or `Empty`) into an [`Ast`].
pub fn decode_ast(fixture: &Value) -> Result<Ast, FixtureError> {
    let items = as_array(fixture)?;
    match leading_tag(items)? {
        "Tree" => {
            let name = str_arg(items, 1, "Tree")?.to_string();
            let children = array_arg(items, 2, "Tree")?
                .iter()
                .map(decode_ast)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Ast::Tree { name, children })
        }
        "Char" => Ok(Ast::Char(char_arg(items, 1, "Char")?)),
        "Empty" => Ok(Ast::Empty),
        other => Err(FixtureError::UnsupportedFixtureNode(other.to_string())),
    }
}

/// Encode an [`Ast`] into its fixture form, the exact inverse of
/// [`decode_ast`].
pub fn encode_ast(node: &Ast) -> Value {
    match node {
        Ast::Tree { name, children } => {
            let children: Vec<Value> = children.iter().map(encode_ast).collect();
            json!(["Tree", name, children])
        }
        Ast::Char(c) => json!(["Char", c.to_string()]),
        Ast::Empty => json!(["Empty"]),
    }
}

/// Decode a parse-result fixture: a `ParseError` record or a success tree.
pub fn decode_parse_result(fixture: &Value) -> Result<ParseResult, FixtureError> {
    let items = as_array(fixture)?;
    if leading_tag(items)? == "ParseError" {
        let pos = uint_arg(items, 1, "ParseError")?;
        let line = uint_arg(items, 2, "ParseError")?;
        let col = uint_arg(items, 3, "ParseError")?;
        let nt = str_arg(items, 4, "ParseError")?.to_string();
        let chars = array_arg(items, 5, "ParseError")?
            .iter()
            .map(decode_err_char)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ParseResult::Error(ParseError::new(
            pos, line, col, nt, chars,
        )));
    }
    decode_ast(fixture).map(ParseResult::Ast)
}

/// Encode a [`ParseResult`] into its fixture form, dispatching on the
/// runtime kind of the value. Exact inverse of [`decode_parse_result`].
pub fn encode_parse_result(result: &ParseResult) -> Value {
    match result {
        ParseResult::Ast(node) => encode_ast(node),
        ParseResult::Error(err) => {
            let chars: Vec<Value> = err.chars.iter().map(encode_err_char).collect();
            json!(["ParseError", err.pos, err.line, err.col, err.nt, chars])
        }
    }
}

/// Decode one piece of failure evidence from its `{"type": ..}` object.
pub fn decode_err_char(entry: &Value) -> Result<ExpectedChar, FixtureError> {
    let obj = entry.as_object().ok_or_else(|| {
        FixtureError::MalformedFixture(format!("error evidence must be an object, got {}", entry))
    })?;
    let ty = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
        FixtureError::MalformedFixture("error evidence is missing its 'type' discriminator".into())
    })?;
    match ty {
        "ErrChar" => {
            let arg = obj.get("arg").and_then(Value::as_str).ok_or_else(|| {
                FixtureError::MalformedFixture("ErrChar requires a string 'arg'".into())
            })?;
            Ok(ExpectedChar::Char(first_char(arg)?))
        }
        "ErrCC" => {
            let arg = obj.get("arg").and_then(Value::as_array).ok_or_else(|| {
                FixtureError::MalformedFixture("ErrCC requires an array 'arg'".into())
            })?;
            let ranges = arg
                .iter()
                .map(decode_char_class_element)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ExpectedChar::Class(ranges))
        }
        "ErrAny" => Ok(ExpectedChar::Any),
        other => Err(FixtureError::UnsupportedErrChar(other.to_string())),
    }
}

/// Encode one piece of failure evidence, the exact inverse of
/// [`decode_err_char`].
pub fn encode_err_char(err: &ExpectedChar) -> Value {
    match err {
        ExpectedChar::Char(c) => json!({"type": "ErrChar", "arg": c.to_string()}),
        ExpectedChar::Class(ranges) => {
            let arg: Vec<Value> = ranges.iter().map(encode_char_class_element).collect();
            json!({"type": "ErrCC", "arg": arg})
        }
        ExpectedChar::Any => json!({"type": "ErrAny"}),
    }
}

fn tagged_exprs(tag: &str, exprs: &[Expr]) -> Value {
    let mut items = vec![Value::from(tag)];
    items.extend(exprs.iter().map(encode_expr));
    Value::Array(items)
}

fn string_of<'a>(value: &'a Value, what: &str) -> Result<&'a str, FixtureError> {
    value.as_str().ok_or_else(|| {
        FixtureError::MalformedFixture(format!("{} must be a string, got {}", what, value))
    })
}

fn as_array(fixture: &Value) -> Result<&[Value], FixtureError> {
    fixture
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| {
            FixtureError::MalformedFixture(format!(
                "expected a tag-prefixed array, got {}",
                fixture
            ))
        })
}

fn leading_tag(items: &[Value]) -> Result<&str, FixtureError> {
    items
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FixtureError::MalformedFixture("fixture array is missing its leading tag".into())
        })
}

fn arg<'a>(items: &'a [Value], idx: usize, tag: &str) -> Result<&'a Value, FixtureError> {
    items.get(idx).ok_or_else(|| {
        FixtureError::MalformedFixture(format!("{} is missing argument {}", tag, idx))
    })
}

fn str_arg<'a>(items: &'a [Value], idx: usize, tag: &str) -> Result<&'a str, FixtureError> {
    arg(items, idx, tag)?.as_str().ok_or_else(|| {
        FixtureError::MalformedFixture(format!("{} argument {} must be a string", tag, idx))
    })
}

fn array_arg<'a>(items: &'a [Value], idx: usize, tag: &str) -> Result<&'a [Value], FixtureError> {
    arg(items, idx, tag)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| {
            FixtureError::MalformedFixture(format!("{} argument {} must be an array", tag, idx))
        })
}

fn uint_arg(items: &[Value], idx: usize, tag: &str) -> Result<usize, FixtureError> {
    arg(items, idx, tag)?
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| {
            FixtureError::MalformedFixture(format!(
                "{} argument {} must be a non-negative integer",
                tag, idx
            ))
        })
}

fn char_arg(items: &[Value], idx: usize, tag: &str) -> Result<char, FixtureError> {
    first_char(str_arg(items, idx, tag)?)
}

fn first_char(s: &str) -> Result<char, FixtureError> {
    s.chars().next().ok_or_else(|| {
        FixtureError::MalformedFixture("character fixture must not be empty".into())
    })
}
