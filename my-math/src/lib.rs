//! Integer arithmetic used by the harness
//!
//! Every operation works on `i64`. The plain functions ([`sum`], [`diff`])
//! wrap on overflow; the `checked_*` variants report it as
//! [`MathError::Overflow`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by the checked operations and operation parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Overflow: {a} {} {b} does not fit in i64", .op.symbol())]
    Overflow { op: Operation, a: i64, b: i64 },
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

pub type MathResult<T> = Result<T, MathError>;

/// Returns `a + b`, wrapping on overflow.
pub fn sum(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

/// Returns `a - b`, wrapping on overflow.
pub fn diff(a: i64, b: i64) -> i64 {
    a.wrapping_sub(b)
}

pub fn checked_sum(a: i64, b: i64) -> MathResult<i64> {
    a.checked_add(b).ok_or(MathError::Overflow {
        op: Operation::Sum,
        a,
        b,
    })
}

pub fn checked_diff(a: i64, b: i64) -> MathResult<i64> {
    a.checked_sub(b).ok_or(MathError::Overflow {
        op: Operation::Diff,
        a,
        b,
    })
}

/// Two operands supplied to an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandPair {
    pub a: i64,
    pub b: i64,
}

impl OperandPair {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// The same operands in reverse order
    pub fn swapped(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

impl From<(i64, i64)> for OperandPair {
    fn from((a, b): (i64, i64)) -> Self {
        Self::new(a, b)
    }
}

/// Arithmetic operation a test case exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sum,
    Diff,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Sum, Operation::Diff];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Diff => "diff",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Sum => "+",
            Operation::Diff => "-",
        }
    }

    pub fn apply(&self, operands: OperandPair) -> i64 {
        match self {
            Operation::Sum => sum(operands.a, operands.b),
            Operation::Diff => diff(operands.a, operands.b),
        }
    }

    pub fn checked_apply(&self, operands: OperandPair) -> MathResult<i64> {
        match self {
            Operation::Sum => checked_sum(operands.a, operands.b),
            Operation::Diff => checked_diff(operands.a, operands.b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" | "add" => Ok(Operation::Sum),
            "diff" | "sub" => Ok(Operation::Diff),
            other => Err(MathError::UnknownOperation(other.to_string())),
        }
    }
}

#[cfg(kani)]
mod proofs {
    use super::*;

    #[kani::proof]
    fn checked_sum_matches_wide_addition() {
        let a: i64 = kani::any();
        let b: i64 = kani::any();
        let wide = a as i128 + b as i128;
        match checked_sum(a, b) {
            Ok(value) => assert!(value as i128 == wide),
            Err(_) => assert!(wide > i64::MAX as i128 || wide < i64::MIN as i128),
        }
    }

    #[kani::proof]
    fn checked_diff_matches_wide_subtraction() {
        let a: i64 = kani::any();
        let b: i64 = kani::any();
        let wide = a as i128 - b as i128;
        match checked_diff(a, b) {
            Ok(value) => assert!(value as i128 == wide),
            Err(_) => assert!(wide > i64::MAX as i128 || wide < i64::MIN as i128),
        }
    }

    #[kani::proof]
    fn wrapping_never_panics() {
        let a: i64 = kani::any();
        let b: i64 = kani::any();
        let _ = sum(a, b);
        let _ = diff(a, b);
    }
}
