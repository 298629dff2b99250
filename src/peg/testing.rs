//! Conformance-test harness
//!
//! Drives a [`PegEngine`](super::engine::PegEngine) from fixture data and
//! compares its output against literal expectations. A test case is plain
//! data: a run spec (`["match", nt, input]` or `["eval", rule, input]`)
//! plus an expected parse-result fixture. Suites of cases load from JSON or
//! YAML documents, so large conformance suites stay literal data rather
//! than hand-built object graphs.

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;

use super::engine::PegEngine;
use super::fixture::{decode_expr, decode_parse_result, encode_parse_result, FixtureError};
use super::grammar::{Grammar, NonTerminalDef, NonTerminalMode};
use super::result::ParseResult;

/// Rule name used for ad hoc single-rule grammars built from fixtures.
pub const SYNTHETIC_START: &str = "S";

/// Failures at the harness level, above the codec itself.
#[derive(Debug, Clone, PartialEq)]
pub enum HarnessError {
    Fixture(FixtureError),
    /// A run spec carried a run type other than `match` or `eval`.
    UnsupportedRunType(String),
    /// A suite document did not deserialize into cases.
    SuiteFormat(String),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Fixture(err) => write!(f, "{}", err),
            HarnessError::UnsupportedRunType(ty) => {
                write!(f, "Unsupported run type '{}'", ty)
            }
            HarnessError::SuiteFormat(msg) => write!(f, "Invalid suite document: {}", msg),
        }
    }
}

impl std::error::Error for HarnessError {}

impl From<FixtureError> for HarnessError {
    fn from(err: FixtureError) -> Self {
        HarnessError::Fixture(err)
    }
}

/// One run request, decoded from a run-spec fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum TestSpec {
    /// Match `input` against the named rule of the environment's grammar.
    Match { nt: String, input: String },
    /// Build a synthetic single-rule grammar from `rule` and match `input`
    /// against it.
    Eval { rule: Value, input: String },
}

impl TestSpec {
    /// Decode `["match", nt, input]` or `["eval", rule, input]`.
    pub fn from_fixture(fixture: &Value) -> Result<Self, HarnessError> {
        let items = fixture.as_array().ok_or_else(|| {
            HarnessError::Fixture(FixtureError::MalformedFixture(format!(
                "run spec must be an array, got {}",
                fixture
            )))
        })?;
        let run_type = items.first().and_then(Value::as_str).ok_or_else(|| {
            HarnessError::Fixture(FixtureError::MalformedFixture(
                "run spec is missing its run type".into(),
            ))
        })?;
        match run_type {
            "match" => Ok(TestSpec::Match {
                nt: spec_str(items, 1)?,
                input: spec_str(items, 2)?,
            }),
            "eval" => Ok(TestSpec::Eval {
                rule: items
                    .get(1)
                    .cloned()
                    .ok_or_else(|| {
                        HarnessError::Fixture(FixtureError::MalformedFixture(
                            "eval spec is missing its rule fixture".into(),
                        ))
                    })?,
                input: spec_str(items, 2)?,
            }),
            other => Err(HarnessError::UnsupportedRunType(other.to_string())),
        }
    }
}

fn spec_str(items: &[Value], idx: usize) -> Result<String, HarnessError> {
    items
        .get(idx)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            HarnessError::Fixture(FixtureError::MalformedFixture(format!(
                "run spec argument {} must be a string",
                idx
            )))
        })
}

/// Decode a fixture expression and wrap it as the synthetic single-rule
/// grammar `{S: voiding rule}` for ad hoc evaluation.
pub fn build_rule(fixture: &Value) -> Result<Grammar, FixtureError> {
    let expr = decode_expr(fixture)?;
    let mut grammar = Grammar::new();
    grammar.insert(
        SYNTHETIC_START.to_string(),
        NonTerminalDef::new(NonTerminalMode::Voiding, expr),
    );
    Ok(grammar)
}

/// Compare an expected parse-result fixture against an actual engine
/// result. Both sides are normalized through the codec to the same literal
/// shape before comparison, so equivalent values always compare equal.
pub fn results_match(expected: &Value, actual: &ParseResult) -> Result<bool, FixtureError> {
    let expected = decode_parse_result(expected)?;
    Ok(encode_parse_result(&expected) == encode_parse_result(actual))
}

/// A grammar plus an engine to run it on.
pub struct TestEnv<'a> {
    grammar: Grammar,
    engine: &'a dyn PegEngine,
}

impl<'a> TestEnv<'a> {
    pub fn new(grammar: Grammar, engine: &'a dyn PegEngine) -> Self {
        Self { grammar, engine }
    }

    /// Run one spec against the engine.
    pub fn run(&self, spec: &TestSpec) -> Result<ParseResult, HarnessError> {
        match spec {
            TestSpec::Match { nt, input } => Ok(self.engine.parse(&self.grammar, nt, input)),
            TestSpec::Eval { rule, input } => {
                // The synthetic rule shadows any existing S in the grammar.
                let expr = decode_expr(rule)?;
                let mut grammar = self.grammar.clone();
                grammar.insert(
                    SYNTHETIC_START.to_string(),
                    NonTerminalDef::new(NonTerminalMode::Voiding, expr),
                );
                Ok(self.engine.parse(&grammar, SYNTHETIC_START, input))
            }
        }
    }

    /// Run a case and compare against its expected fixture.
    pub fn check(&self, case: &FixtureCase) -> Result<bool, HarnessError> {
        let spec = TestSpec::from_fixture(&case.spec)?;
        let actual = self.run(&spec)?;
        Ok(results_match(&case.expected, &actual)?)
    }
}

/// One conformance case: a run spec plus its expected result, both literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    pub spec: Value,
    pub expected: Value,
}

/// A collection of conformance cases loaded from a literal document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureSuite {
    pub cases: Vec<FixtureCase>,
}

impl FixtureSuite {
    pub fn from_json(text: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(text).map_err(|e| HarnessError::SuiteFormat(e.to_string()))
    }

    pub fn from_yaml(text: &str) -> Result<Self, HarnessError> {
        serde_yaml::from_str(text).map_err(|e| HarnessError::SuiteFormat(e.to_string()))
    }
}

/// Expression fixtures covering every tag once, for codec smoke tests.
pub static EXPR_FIXTURES: Lazy<Vec<Value>> = Lazy::new(|| {
    vec![
        json!(["NT", "S"]),
        json!(["ALT", ["CHAR", "a"], ["CHAR", "b"]]),
        json!(["SEQ", ["CHAR", "a"], ["ANY_CHAR"]]),
        json!(["CHAR", "x"]),
        json!(["CHAR_CLASS", "a", ["0", "9"]]),
        json!(["PLUS", ["ANY_CHAR"]]),
        json!(["STAR", ["CHAR", "a"]]),
        json!(["OPT", ["NT", "Sign"]]),
        json!(["AND", ["CHAR_CLASS", ["a", "z"]]]),
        json!(["NOT", ["CHAR", "\n"]]),
        json!(["VOID", ["NT", "Ws"]]),
        json!(["ANY_CHAR"]),
    ]
});
