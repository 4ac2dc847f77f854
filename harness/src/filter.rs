use crate::error::HarnessResult;
use glob::Pattern;

/// Case-name filter in gtest's `--gtest_filter` syntax.
///
/// `POSITIVE[:POSITIVE...][-NEGATIVE[:NEGATIVE...]]`, each part a glob over
/// `suite.name`. A name is selected when it matches some positive pattern
/// and no negative one. An empty positive list means `*`.
#[derive(Debug, Clone)]
pub struct CaseFilter {
    positive: Vec<Pattern>,
    negative: Vec<Pattern>,
}

impl CaseFilter {
    pub fn parse(filter: &str) -> HarnessResult<Self> {
        let (positive, negative) = match filter.split_once('-') {
            Some((pos, neg)) => (pos, neg),
            None => (filter, ""),
        };

        Ok(Self {
            positive: compile(positive)?,
            negative: compile(negative)?,
        })
    }

    pub fn all() -> Self {
        Self {
            positive: vec![],
            negative: vec![],
        }
    }

    pub fn matches(&self, full_name: &str) -> bool {
        (self.positive.is_empty() || self.positive.iter().any(|p| p.matches(full_name)))
            && !self.negative.iter().any(|p| p.matches(full_name))
    }
}

fn compile(patterns: &str) -> HarnessResult<Vec<Pattern>> {
    patterns
        .split(':')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Pattern::new(p).map_err(Into::into))
        .collect()
}
