//! Exact-match filtering of issue lists.

use crate::domain::issue::{FieldValue, Issue, IssueField};

/// Which issue field a criterion targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKey {
    Field(IssueField),
    /// A key no issue has. A criterion on it never matches.
    Unknown(String),
}

impl FilterKey {
    pub fn parse(key: &str) -> Self {
        IssueField::from_key(key)
            .map(FilterKey::Field)
            .unwrap_or_else(|| FilterKey::Unknown(key.to_string()))
    }
}

/// A single `field == value` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub key: FilterKey,
    pub value: FieldValue,
}

impl Criterion {
    pub fn matches(&self, issue: &Issue) -> bool {
        match &self.key {
            FilterKey::Field(field) => issue.field_value(*field) == self.value,
            FilterKey::Unknown(_) => false,
        }
    }
}

/// Conjunction of criteria; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    criteria: Vec<Criterion>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from raw `(key, value)` query pairs, normalizing each value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |filter, (k, v)| filter.with(k.as_ref(), v.as_ref()))
    }

    /// Adds a criterion from a raw key and value.
    pub fn with(mut self, key: &str, raw_value: &str) -> Self {
        self.criteria.push(Criterion {
            key: FilterKey::parse(key),
            value: FieldValue::normalize(raw_value),
        });
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.criteria.iter().all(|c| c.matches(issue))
    }

    /// Returns the matching issues in their original order.
    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        issues
            .iter()
            .filter(|issue| self.matches(issue))
            .cloned()
            .collect()
    }
}
