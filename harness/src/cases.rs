//! Test case definitions
//!
//! A [`TestCase`] pairs an operation and its operands with the exact value the
//! operation must produce. Cases come from the built-in `math_tests` suite and
//! from TOML case files:
//!
//! ```toml
//! [[case]]
//! suite = "math_tests"
//! name = "test_sum_negative"
//! op = "sum"
//! a = -4
//! b = 1
//! expected = -3
//! ```

use crate::error::{HarnessError, HarnessResult};
use my_math::{OperandPair, Operation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

pub const BUILTIN_SUITE: &str = "math_tests";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub suite: String,
    pub name: String,
    pub op: Operation,
    pub operands: OperandPair,
    pub expected: i64,
}

impl TestCase {
    pub fn new(
        suite: impl Into<String>,
        name: impl Into<String>,
        op: Operation,
        operands: impl Into<OperandPair>,
        expected: i64,
    ) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            op,
            operands: operands.into(),
            expected,
        }
    }

    /// `suite.name`, the form filters match against
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }

    pub fn evaluate(&self) -> i64 {
        self.op.apply(self.operands)
    }

    /// Source-like rendering of the call, e.g. `diff(1, 2)`
    pub fn call_expr(&self) -> String {
        format!("{}({}, {})", self.op, self.operands.a, self.operands.b)
    }
}

/// The `math_tests` suite: `sum(1, 2) == 3` and `diff(1, 2) == -1`
pub fn builtin_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(BUILTIN_SUITE, "test_sum", Operation::Sum, (1, 2), 3),
        TestCase::new(BUILTIN_SUITE, "test_diff", Operation::Diff, (1, 2), -1),
    ]
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    #[serde(default, rename = "case")]
    cases: Vec<CaseEntry>,
}

#[derive(Debug, Deserialize)]
struct CaseEntry {
    #[serde(default = "default_suite")]
    suite: String,
    name: String,
    op: String,
    a: i64,
    b: i64,
    expected: i64,
}

fn default_suite() -> String {
    BUILTIN_SUITE.to_string()
}

impl CaseEntry {
    fn into_case(self) -> HarnessResult<TestCase> {
        let full_name = format!("{}.{}", self.suite, self.name);
        if self.suite.trim().is_empty() || self.name.trim().is_empty() {
            return Err(HarnessError::InvalidCase {
                name: full_name,
                reason: "suite and name must be non-empty".to_string(),
            });
        }
        if self.suite.contains('.') || self.name.contains('.') {
            return Err(HarnessError::InvalidCase {
                name: full_name,
                reason: "suite and name cannot contain '.'".to_string(),
            });
        }
        let op = self.op.parse::<Operation>()?;
        Ok(TestCase::new(
            self.suite,
            self.name,
            op,
            (self.a, self.b),
            self.expected,
        ))
    }
}

pub fn parse_cases(content: &str) -> HarnessResult<Vec<TestCase>> {
    let file: CaseFile = toml::from_str(content)?;
    let cases = file
        .cases
        .into_iter()
        .map(CaseEntry::into_case)
        .collect::<HarnessResult<Vec<_>>>()?;
    ensure_unique(&cases)?;
    Ok(cases)
}

pub fn load_cases(path: &Path) -> HarnessResult<Vec<TestCase>> {
    let content = std::fs::read_to_string(path).map_err(|e| HarnessError::CaseFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let cases = parse_cases(&content).map_err(|e| HarnessError::CaseFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!("Loaded {} cases from {}", cases.len(), path.display());
    Ok(cases)
}

pub fn ensure_unique(cases: &[TestCase]) -> HarnessResult<()> {
    let mut seen = HashSet::new();
    for case in cases {
        let name = case.full_name();
        if !seen.insert(name.clone()) {
            return Err(HarnessError::DuplicateCase { name });
        }
    }
    Ok(())
}
