pub mod cases;
pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod runner;

pub use cases::{builtin_cases, load_cases, parse_cases, TestCase, BUILTIN_SUITE};
pub use config::{HarnessConfig, ReportFormat};
pub use error::{HarnessError, HarnessResult};
pub use filter::CaseFilter;
pub use report::{CaseOutcome, CaseReport, RunReport};
pub use runner::{check, Runner};
