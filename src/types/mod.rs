//! Canonical result records and the view models derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod raw;

pub use raw::{RawEntry, RawViolation};

/// Size of the static rule catalog the engine evaluates.
pub const TOTAL_RULES: u32 = 20;

/// Outcome of one rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    /// Older engine builds spell this `NOT FOLLOWED`.
    #[serde(rename = "NOT_FOLLOWED", alias = "NOT FOLLOWED")]
    NotFollowed,
    /// Engine-side problem with the run, usually an unparsable policy.
    #[serde(rename = "ERROR")]
    Error,
}

impl Status {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotFollowed => "NOT_FOLLOWED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule result in its one canonical shape.
///
/// `line` is 1-based and never zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedResult {
    pub status: Status,
    pub rule_no: u32,
    pub rule_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl NormalizedResult {
    /// Creates a result with no location or remediation detail.
    #[must_use]
    pub fn new(status: Status, rule_no: u32, rule_name: impl Into<String>) -> Self {
        Self {
            status,
            rule_no,
            rule_name: rule_name.into(),
            line: None,
            reason: None,
            suggestion: None,
        }
    }

    /// Attaches a line; zero is discarded.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = (line > 0).then_some(line);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Deterministic encoding of every field.
    ///
    /// Strings are length-prefixed so that no two distinct records share a
    /// signature, and `None` is encoded differently from an empty string.
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.status.as_str(),
            self.rule_no,
            encode_text(Some(&self.rule_name)),
            self.line.map_or_else(|| "-".to_string(), |l| l.to_string()),
            encode_text(self.reason.as_deref()),
            encode_text(self.suggestion.as_deref()),
        )
    }
}

fn encode_text(text: Option<&str>) -> String {
    match text {
        Some(t) => format!("{}:{t}", t.len()),
        None => "-".to_string(),
    }
}

/// Results split by status. Each group keeps first-seen order, except
/// `violations`, which is sorted by line then rule number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub followed: Vec<NormalizedResult>,
    pub violations: Vec<NormalizedResult>,
    pub errors: Vec<NormalizedResult>,
}

impl ResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.followed.is_empty() && self.violations.is_empty() && self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.followed.len() + self.violations.len() + self.errors.len()
    }

    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// `ERROR` entries are reported alongside the rest and never fail a run.
    #[must_use]
    pub fn has_policy_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Pass/fail split of the rule catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total_rules: u32,
    pub failed_rule_count: u32,
    pub passed_rule_count: u32,
    pub percent: u32,
}

/// How many violations one rule produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub rule_no: u32,
    pub count: usize,
}

/// Everything one successful analysis run publishes, replaced as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub results: ResultSet,
    pub summary: ComplianceSummary,
    pub frequency: Vec<FrequencyEntry>,
}
