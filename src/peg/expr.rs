//! PEG expression model
//!
//! An [`Expr`] describes the body of a single grammar rule. The set of
//! variants is closed: twelve shapes covering terminal matches (`Char`,
//! `CharClass`, `AnyChar`), combinators (`Alt`, `Seq`, `Plus`, `Star`,
//! `Opt`, `And`, `Not`, `Void`) and the non-terminal reference (`Nt`).
//!
//! Alternatives in PEGs are ordered and greedy, so `Alt`, `Seq` and
//! `CharClass` all preserve declaration order exactly. The fixture codec
//! relies on this to round-trip literal data without loss.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One element of a character class: a single codepoint or an inclusive
/// codepoint range. A Rust `char` is a Unicode scalar value, so the
/// codepoint-level identity the fixture notation requires (`'a'` ⇄ 97)
/// holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClassElement {
    Single(char),
    Range(char, char),
}

impl CharClassElement {
    /// Whether `c` falls inside this element.
    pub fn contains(&self, c: char) -> bool {
        match self {
            CharClassElement::Single(single) => *single == c,
            CharClassElement::Range(lo, hi) => (*lo..=*hi).contains(&c),
        }
    }
}

impl fmt::Display for CharClassElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClassElement::Single(c) => write!(f, "{}", c),
            CharClassElement::Range(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

/// A PEG rule body.
///
/// Unary combinators box their sub-expression; `Alt` and `Seq` hold an
/// ordered, non-empty sequence of sub-expressions. The enum being closed
/// means exhaustive matches over it are checked by the compiler; the only
/// place an unknown shape can appear is the fixture-decode boundary, which
/// reports it as [`UnknownExprType`](super::fixture::FixtureError::UnknownExprType).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Reference to a named rule.
    Nt { name: String },
    /// Ordered choice: the first matching alternative wins.
    Alt { exprs: Vec<Expr> },
    /// Sequence: every sub-expression must match in order.
    Seq { exprs: Vec<Expr> },
    /// A single literal character.
    Char { char: char },
    /// A set of codepoints and ranges, tried in declaration order.
    CharClass { ranges: Vec<CharClassElement> },
    /// One or more repetitions.
    Plus { expr: Box<Expr> },
    /// Zero or more repetitions.
    Star { expr: Box<Expr> },
    /// Zero or one occurrence.
    Opt { expr: Box<Expr> },
    /// Positive lookahead: must match, consumes nothing.
    And { expr: Box<Expr> },
    /// Negative lookahead: must not match, consumes nothing.
    Not { expr: Box<Expr> },
    /// Match normally but discard the result from the tree.
    Void { expr: Box<Expr> },
    /// Any single character.
    AnyChar,
}

impl Expr {
    pub fn nt(name: impl Into<String>) -> Self {
        Expr::Nt { name: name.into() }
    }

    /// Ordered choice over `exprs`, which must be non-empty.
    pub fn alt(exprs: Vec<Expr>) -> Self {
        debug_assert!(!exprs.is_empty(), "ALT requires at least one alternative");
        Expr::Alt { exprs }
    }

    /// Sequence of `exprs`, which must be non-empty.
    pub fn seq(exprs: Vec<Expr>) -> Self {
        debug_assert!(!exprs.is_empty(), "SEQ requires at least one sub-expression");
        Expr::Seq { exprs }
    }

    pub fn char(c: char) -> Self {
        Expr::Char { char: c }
    }

    pub fn char_class(ranges: Vec<CharClassElement>) -> Self {
        Expr::CharClass { ranges }
    }

    pub fn plus(expr: Expr) -> Self {
        Expr::Plus { expr: Box::new(expr) }
    }

    pub fn star(expr: Expr) -> Self {
        Expr::Star { expr: Box::new(expr) }
    }

    pub fn opt(expr: Expr) -> Self {
        Expr::Opt { expr: Box::new(expr) }
    }

    pub fn and(expr: Expr) -> Self {
        Expr::And { expr: Box::new(expr) }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not { expr: Box::new(expr) }
    }

    pub fn void(expr: Expr) -> Self {
        Expr::Void { expr: Box::new(expr) }
    }
}

impl fmt::Display for Expr {
    /// Renders in the usual PEG surface syntax, for diagnostics only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nt { name } => write!(f, "{}", name),
            Expr::Alt { exprs } => {
                write!(f, "(")?;
                for (i, e) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, ")")
            }
            Expr::Seq { exprs } => {
                write!(f, "(")?;
                for (i, e) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, ")")
            }
            Expr::Char { char } => write!(f, "'{}'", char),
            Expr::CharClass { ranges } => {
                write!(f, "[")?;
                for r in ranges {
                    write!(f, "{}", r)?;
                }
                write!(f, "]")
            }
            Expr::Plus { expr } => write!(f, "{}+", expr),
            Expr::Star { expr } => write!(f, "{}*", expr),
            Expr::Opt { expr } => write!(f, "{}?", expr),
            Expr::And { expr } => write!(f, "&{}", expr),
            Expr::Not { expr } => write!(f, "!{}", expr),
            Expr::Void { expr } => write!(f, ":{}", expr),
            Expr::AnyChar => write!(f, "."),
        }
    }
}
