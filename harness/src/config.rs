use crate::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Output format of a run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// gtest-style console output
    #[default]
    Text,
    /// Machine-readable JSON report
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => f.write_str("text"),
            ReportFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// gtest-style filter: `:`-separated globs, negatives after a `-`
    pub filter: String,
    /// Stop at the first failed case
    pub fail_fast: bool,
    pub format: ReportFormat,
    /// Extra cases loaded from a TOML file
    pub cases_file: Option<PathBuf>,
    /// Include the built-in `math_tests` suite
    pub include_builtin: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            filter: "*".to_string(),
            fail_fast: false,
            format: ReportFormat::Text,
            cases_file: None,
            include_builtin: true,
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> HarnessResult<Self> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> HarnessResult<Self> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file without validating it, for callers that apply
    /// overrides before validation.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_cases_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cases_file = Some(path.into());
        self
    }

    pub fn with_builtin(mut self, include_builtin: bool) -> Self {
        self.include_builtin = include_builtin;
        self
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if self.filter.trim().is_empty() {
            return Err(HarnessError::Config {
                reason: "Filter cannot be empty".to_string(),
            });
        }

        if !self.include_builtin && self.cases_file.is_none() {
            return Err(HarnessError::Config {
                reason: "No cases to run: built-in suite disabled and no case file given"
                    .to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.filter, "*");
        assert!(!config.fail_fast);
        assert_eq!(config.format, ReportFormat::Text);
        assert!(config.include_builtin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = HarnessConfig::new()
            .with_filter("math_tests.*")
            .with_fail_fast(true)
            .with_format(ReportFormat::Json)
            .with_cases_file("cases.toml");

        assert_eq!(config.filter, "math_tests.*");
        assert!(config.fail_fast);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.cases_file, Some(PathBuf::from("cases.toml")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = HarnessConfig::default();

        config.filter = "  ".to_string();
        assert!(config.validate().is_err());

        config.filter = "*".to_string();
        config.include_builtin = false;
        assert!(config.validate().is_err());

        config.cases_file = Some(PathBuf::from("extra.toml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = HarnessConfig::from_toml_str("fail_fast = true\nformat = \"json\"\n").unwrap();
        assert!(config.fail_fast);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.filter, "*");
        assert!(config.include_builtin);
    }

    #[test]
    fn test_load_defers_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"include_builtin = false\n").unwrap();

        assert!(HarnessConfig::from_toml_file(file.path()).is_err());

        let config = HarnessConfig::load(file.path()).unwrap();
        assert!(!config.include_builtin);
        assert!(config.validate().is_err());
        assert!(config.with_cases_file("cases.toml").validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(HarnessConfig::from_toml_str("filter = \"\"").is_err());
        assert!(HarnessConfig::from_toml_str("format = \"xml\"").is_err());
    }
}
