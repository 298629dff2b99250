//! Parse result model
//!
//! The two output shapes a matching engine produces: [`Ast`] for a
//! successful match and [`ParseError`] for the furthest-reaching failure.
//! Both are immutable once constructed and compare structurally, with
//! child and evidence order significant.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expr::CharClassElement;

/// A success tree.
///
/// `Tree` nodes are named after the rule that produced them; their children
/// are nested trees, bare characters, or voided matches. `Empty` is the
/// canonical value for a match that produced no tree at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ast {
    Tree { name: String, children: Vec<Ast> },
    Char(char),
    Empty,
}

impl Ast {
    pub fn tree(name: impl Into<String>, children: Vec<Ast>) -> Self {
        Ast::Tree {
            name: name.into(),
            children,
        }
    }

    /// True iff this is the canonical empty/voided match.
    pub fn is_empty(&self) -> bool {
        matches!(self, Ast::Empty)
    }

    /// The rule name, for `Tree` nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Ast::Tree { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The node's children; leaves have none.
    pub fn children(&self) -> &[Ast] {
        match self {
            Ast::Tree { children, .. } => children,
            _ => &[],
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Tree { name, children } => {
                write!(f, "{}(", name)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
            Ast::Char(c) => write!(f, "'{}'", c),
            Ast::Empty => write!(f, "<empty>"),
        }
    }
}

/// One thing the engine would have accepted at the failure position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpectedChar {
    /// A specific literal character.
    Char(char),
    /// Any character in a class, same element shape as `Expr::CharClass`.
    Class(Vec<CharClassElement>),
    /// Any character at all (input ended too early).
    Any,
}

impl fmt::Display for ExpectedChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedChar::Char(c) => write!(f, "'{}'", c),
            ExpectedChar::Class(ranges) => {
                write!(f, "[")?;
                for r in ranges {
                    write!(f, "{}", r)?;
                }
                write!(f, "]")
            }
            ExpectedChar::Any => write!(f, "any character"),
        }
    }
}

/// The furthest-reaching failure: where matching stopped and the ordered
/// set of things that would have been accepted there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    /// Byte-independent character offset into the input.
    pub pos: usize,
    pub line: usize,
    pub col: usize,
    /// The rule being matched at the failure point.
    pub nt: String,
    pub chars: Vec<ExpectedChar>,
}

impl ParseError {
    pub fn new(
        pos: usize,
        line: usize,
        col: usize,
        nt: impl Into<String>,
        chars: Vec<ExpectedChar>,
    ) -> Self {
        Self {
            pos,
            line,
            col,
            nt: nt.into(),
            chars,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error in {} at {}:{} (offset {}): expected ",
            self.nt, self.line, self.col, self.pos
        )?;
        if self.chars.is_empty() {
            return write!(f, "nothing");
        }
        for (i, c) in self.chars.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// What a matching engine hands back: a success tree or a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseResult {
    Ast(Ast),
    Error(ParseError),
}

impl ParseResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ParseResult::Error(_))
    }

    pub fn ast(&self) -> Option<&Ast> {
        match self {
            ParseResult::Ast(ast) => Some(ast),
            ParseResult::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_only_for_canonical_empty() {
        assert!(Ast::Empty.is_empty());
        assert!(!Ast::Char('a').is_empty());
        assert!(!Ast::tree("S", vec![]).is_empty());
    }

    #[test]
    fn test_tree_equality_is_order_sensitive() {
        let ab = Ast::tree("S", vec![Ast::Char('a'), Ast::Char('b')]);
        let ba = Ast::tree("S", vec![Ast::Char('b'), Ast::Char('a')]);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_parse_error_equality_covers_all_fields() {
        let base = ParseError::new(3, 1, 4, "S", vec![ExpectedChar::Any]);
        assert_eq!(base, base.clone());
        assert_ne!(base, ParseError::new(4, 1, 4, "S", vec![ExpectedChar::Any]));
        assert_ne!(base, ParseError::new(3, 1, 4, "T", vec![ExpectedChar::Any]));
        assert_ne!(base, ParseError::new(3, 1, 4, "S", vec![]));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(
            3,
            1,
            4,
            "S",
            vec![ExpectedChar::Char('x'), ExpectedChar::Any],
        );
        assert_eq!(
            err.to_string(),
            "parse error in S at 1:4 (offset 3): expected 'x' or any character"
        );
    }

    #[test]
    fn test_ast_display() {
        let tree = Ast::tree("S", vec![Ast::Char('a'), Ast::Empty]);
        assert_eq!(tree.to_string(), "S('a' <empty>)");
    }
}
