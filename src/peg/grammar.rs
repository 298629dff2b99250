//! Grammar rule definitions
//!
//! A [`Grammar`] maps rule names to their definitions. Each definition pairs
//! a rule body with a [`NonTerminalMode`] saying whether a successful match
//! becomes a node in the result tree or is discarded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::expr::Expr;

/// What happens to a rule's successful match in the result tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonTerminalMode {
    /// The match is kept as a tree node named after the rule.
    Ast,
    /// The match is discarded from the result tree.
    Voiding,
}

/// A named rule body plus its result mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonTerminalDef {
    pub mode: NonTerminalMode,
    pub expr: Expr,
}

impl NonTerminalDef {
    pub fn new(mode: NonTerminalMode, expr: Expr) -> Self {
        Self { mode, expr }
    }
}

/// A complete grammar: rule name → definition.
pub type Grammar = HashMap<String, NonTerminalDef>;
