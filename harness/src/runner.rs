use crate::cases::{builtin_cases, ensure_unique, load_cases, TestCase};
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::filter::CaseFilter;
use crate::report::{CaseOutcome, CaseReport, RunReport};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Evaluates test cases and compares each result against its expected value
#[derive(Debug, Clone)]
pub struct Runner {
    filter: CaseFilter,
    fail_fast: bool,
}

impl Runner {
    pub fn new(config: &HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        Ok(Self {
            filter: CaseFilter::parse(&config.filter)?,
            fail_fast: config.fail_fast,
        })
    }

    pub fn with_filter(mut self, filter: CaseFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Cases from the configured sources, in definition order
    pub fn collect(config: &HarnessConfig) -> HarnessResult<Vec<TestCase>> {
        let mut cases = if config.include_builtin {
            builtin_cases()
        } else {
            Vec::new()
        };
        if let Some(path) = &config.cases_file {
            cases.extend(load_cases(path)?);
        }
        ensure_unique(&cases)?;
        Ok(cases)
    }

    /// Cases this runner would evaluate
    pub fn select<'a>(&self, cases: &'a [TestCase]) -> Vec<&'a TestCase> {
        cases
            .iter()
            .filter(|case| self.filter.matches(&case.full_name()))
            .collect()
    }

    pub fn run(&self, cases: &[TestCase]) -> RunReport {
        let selected = self.select(cases);
        info!(
            "Running {} of {} cases (fail_fast: {})",
            selected.len(),
            cases.len(),
            self.fail_fast
        );

        let run_start = Instant::now();
        let mut report = RunReport::new(Utc::now());
        let mut halted = false;

        for case in selected {
            if halted {
                debug!("Skipping {}", case.full_name());
                report.cases.push(CaseReport::new(case, CaseOutcome::Skipped, 0));
                continue;
            }

            let start = Instant::now();
            let outcome = check(case);
            let elapsed_us = start.elapsed().as_micros() as u64;

            match &outcome {
                CaseOutcome::Passed { actual } => {
                    debug!("{} passed: {} == {}", case.full_name(), case.call_expr(), actual);
                }
                CaseOutcome::Failed { actual, expected } => {
                    warn!(
                        "{} failed: {} returned {}, expected {}",
                        case.full_name(),
                        case.call_expr(),
                        actual,
                        expected
                    );
                    halted = self.fail_fast;
                }
                CaseOutcome::Skipped => {}
            }

            report.cases.push(CaseReport::new(case, outcome, elapsed_us));
        }

        report.elapsed_us = run_start.elapsed().as_micros() as u64;
        info!(
            "Run finished: {} passed, {} failed, {} skipped",
            report.passed(),
            report.failed(),
            report.skipped()
        );
        report
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            filter: CaseFilter::all(),
            fail_fast: false,
        }
    }
}

/// Exact-equality assertion for a single case
pub fn check(case: &TestCase) -> CaseOutcome {
    let actual = case.evaluate();
    if actual == case.expected {
        CaseOutcome::Passed { actual }
    } else {
        CaseOutcome::Failed {
            actual,
            expected: case.expected,
        }
    }
}
