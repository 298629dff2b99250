//! Action and continuation records
//!
//! These capture one step of the engine's evaluation as plain data, for
//! inspection and serialization. They carry no behavior: what an
//! [`ApplyAction`] actually advances is owned entirely by the external
//! matching engine. Serialization is an explicit, per-field contract —
//! every record serializes to exactly its declared fields, so the same
//! value always produces the same structured output.

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::result::{Ast, ParseError};

/// Discriminator for engine actions. Only `Apply` is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "APPLY")]
    Apply,
}

/// A pending next-step: resume matching `expr` at input offset `pos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continuation {
    pub expr: Expr,
    pub pos: usize,
}

impl Continuation {
    pub fn new(expr: Expr, pos: usize) -> Self {
        Self { expr, pos }
    }
}

/// An ordered sequence of pending next-steps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Continuations(pub Vec<Continuation>);

impl Continuations {
    pub fn new(steps: Vec<Continuation>) -> Self {
        Self(steps)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Continuation> {
        self.0.iter()
    }
}

/// The outcome attached to one evaluation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    Matched(Ast),
    Failed(ParseError),
}

/// One step of the engine's evaluation, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Apply(ApplyAction),
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Apply(_) => ActionType::Apply,
        }
    }

    pub fn as_apply(&self) -> Option<&ApplyAction> {
        match self {
            Action::Apply(apply) => Some(apply),
        }
    }
}

/// An `Apply` step: the pending continuations plus the outcome attached to
/// this step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyAction {
    pub continuations: Continuations,
    pub match_result: MatchResult,
}

impl ApplyAction {
    pub fn new(continuations: Continuations, match_result: MatchResult) -> Self {
        Self {
            continuations,
            match_result,
        }
    }

    pub fn match_result(&self) -> &MatchResult {
        &self.match_result
    }
}
