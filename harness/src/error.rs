use my_math::MathError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the harness before or outside of case evaluation.
///
/// Assertion failures are not errors: they are recorded in the
/// [`RunReport`](crate::report::RunReport) and turned into the exit code.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Invalid case file {path}: {reason}")]
    CaseFile { path: PathBuf, reason: String },

    #[error("Invalid case {name}: {reason}")]
    InvalidCase { name: String, reason: String },

    #[error("Duplicate case: {name}")]
    DuplicateCase { name: String },

    #[error("Invalid filter pattern: {0}")]
    Filter(#[from] glob::PatternError),

    #[error("Math error: {0}")]
    Math(#[from] MathError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
