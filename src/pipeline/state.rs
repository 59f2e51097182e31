//! The single view-state record driving presentation.

use crate::error::{FailureKind, PipelineError};
use crate::types::{AnalysisReport, ComplianceSummary, FrequencyEntry, ResultSet};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Why the last run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&PipelineError> for Failure {
    fn from(e: &PipelineError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Immutable snapshot. Every transition builds a new value; nothing mutates
/// one that has been published.
///
/// `report` is the last successful analysis. It stays visible while a later
/// run is loading and after a later run fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Arc<AnalysisReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::idle()
    }
}

impl ViewState {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            report: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn loading(&self) -> Self {
        Self {
            phase: Phase::Loading,
            report: self.report.clone(),
            failure: None,
        }
    }

    #[must_use]
    pub fn success(report: impl Into<Arc<AnalysisReport>>) -> Self {
        Self {
            phase: Phase::Success,
            report: Some(report.into()),
            failure: None,
        }
    }

    #[must_use]
    pub fn failure(&self, error: &PipelineError) -> Self {
        Self {
            phase: Phase::Failure,
            report: self.report.clone(),
            failure: Some(Failure::from(error)),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    #[must_use]
    pub fn result_set(&self) -> Option<&ResultSet> {
        self.report.as_deref().map(|r| &r.results)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&ComplianceSummary> {
        self.report.as_deref().map(|r| &r.summary)
    }

    #[must_use]
    pub fn frequency(&self) -> Option<&[FrequencyEntry]> {
        self.report.as_deref().map(|r| r.frequency.as_slice())
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }
}
