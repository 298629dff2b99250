//! # pegcheck
//!
//! Data model and fixture codec for PEG parser conformance testing.
//!
//! A PEG grammar rule body is modeled by [`peg::expr::Expr`], the results a
//! matching engine produces by [`peg::result::Ast`] and
//! [`peg::result::ParseError`], and single evaluation steps by the records in
//! [`peg::action`]. The [`peg::fixture`] codec converts all of these to and
//! from a compact literal "fixture" notation so that large conformance suites
//! can be written as plain data:
//!
//! ```text
//! ["SEQ", ["PLUS", ["CHAR_CLASS", ["a", "z"]]], ["CHAR", "!"]]
//! ```
//!
//! The matching engine itself is an external collaborator; only its call
//! surface is modeled here (see [`peg::engine`]).

pub mod peg;
