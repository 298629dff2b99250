//! Interface to the matching engine
//!
//! The backtracking PEG matcher is an external collaborator; only its call
//! surface is modeled here so that harness code can drive any engine
//! implementation against fixture data.

use super::grammar::Grammar;
use super::result::ParseResult;

/// Trait for pluggable PEG matching engines.
pub trait PegEngine: Send + Sync {
    /// Return the name of this engine implementation.
    fn name(&self) -> &'static str;

    /// Match `input` against the rule `start` of `grammar`, producing the
    /// success tree or the furthest-reaching failure.
    fn parse(&self, grammar: &Grammar, start: &str, input: &str) -> ParseResult;
}
