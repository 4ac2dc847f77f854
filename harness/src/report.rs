//! Run reports and their text/JSON renderings
//!
//! The text rendering follows the gtest console layout so that output from
//! this harness reads the same as a native gtest binary.

use crate::cases::TestCase;
use crate::config::ReportFormat;
use crate::error::HarnessResult;
use chrono::{DateTime, Utc};
use my_math::{OperandPair, Operation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed { actual: i64 },
    Failed { actual: i64, expected: i64 },
    /// Not evaluated because an earlier case failed under fail-fast
    Skipped,
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CaseOutcome::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CaseOutcome::Skipped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub suite: String,
    pub name: String,
    pub op: Operation,
    pub operands: OperandPair,
    pub outcome: CaseOutcome,
    pub elapsed_us: u64,
}

impl CaseReport {
    pub fn new(case: &TestCase, outcome: CaseOutcome, elapsed_us: u64) -> Self {
        Self {
            suite: case.suite.clone(),
            name: case.name.clone(),
            op: case.op,
            operands: case.operands,
            outcome,
            elapsed_us,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub cases: Vec<CaseReport>,
    pub elapsed_us: u64,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            cases: Vec::new(),
            elapsed_us: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_skipped()).count()
    }

    pub fn suite_count(&self) -> usize {
        self.cases
            .iter()
            .map(|c| c.suite.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn success(&self) -> bool {
        self.failed() == 0
    }

    /// 0 when every evaluated case passed, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn render(&self, format: ReportFormat) -> HarnessResult<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            "[==========] Running {} from {}.",
            plural(self.total(), "test"),
            plural(self.suite_count(), "test suite")
        )?;

        for case in &self.cases {
            let full_name = case.full_name();
            let ms = case.elapsed_us / 1000;
            match &case.outcome {
                CaseOutcome::Passed { .. } => {
                    writeln!(out, "[ RUN      ] {}", full_name)?;
                    writeln!(out, "[       OK ] {} ({} ms)", full_name, ms)?;
                }
                CaseOutcome::Failed { actual, expected } => {
                    writeln!(out, "[ RUN      ] {}", full_name)?;
                    writeln!(out, "Failure")?;
                    writeln!(out, "Expected equality of these values:")?;
                    writeln!(
                        out,
                        "  {}({}, {})",
                        case.op, case.operands.a, case.operands.b
                    )?;
                    writeln!(out, "    Which is: {}", actual)?;
                    writeln!(out, "  {}", expected)?;
                    writeln!(out, "[  FAILED  ] {} ({} ms)", full_name, ms)?;
                }
                CaseOutcome::Skipped => {
                    writeln!(out, "[  SKIPPED ] {}", full_name)?;
                }
            }
        }

        writeln!(
            out,
            "[==========] {} from {} ran. ({} ms total)",
            plural(self.total() - self.skipped(), "test"),
            plural(self.suite_count(), "test suite"),
            self.elapsed_us / 1000
        )?;
        writeln!(out, "[  PASSED  ] {}.", plural(self.passed(), "test"))?;

        if self.skipped() > 0 {
            writeln!(out, "[  SKIPPED ] {}.", plural(self.skipped(), "test"))?;
        }

        if self.failed() > 0 {
            writeln!(
                out,
                "[  FAILED  ] {}, listed below:",
                plural(self.failed(), "test")
            )?;
            for case in self.cases.iter().filter(|c| c.outcome.is_failed()) {
                writeln!(out, "[  FAILED  ] {}", case.full_name())?;
            }
        }

        Ok(())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
