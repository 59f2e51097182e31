// src/error.rs
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::EngineError;

/// Category of a fatal analysis failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InputMissing,
    EngineUnavailable,
    EngineThrew,
    MalformedOutput,
    Busy,
    Abandoned,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InputMissing => "input missing",
            Self::EngineUnavailable => "engine unavailable",
            Self::EngineThrew => "engine failed",
            Self::MalformedOutput => "malformed output",
            Self::Busy => "busy",
            Self::Abandoned => "abandoned",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please load a PLC source file before analyzing.")]
    InputMissing,

    #[error("Analysis engine is unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Analysis engine failed: {0}")]
    EngineThrew(String),

    #[error("Engine returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("An analysis is already running")]
    Busy,

    /// The caller stopped waiting before the run finished.
    #[error("Analysis was abandoned before it finished")]
    Abandoned,
}

impl PipelineError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InputMissing => FailureKind::InputMissing,
            Self::EngineUnavailable(_) => FailureKind::EngineUnavailable,
            Self::EngineThrew(_) => FailureKind::EngineThrew,
            Self::MalformedOutput(_) => FailureKind::MalformedOutput,
            Self::Busy => FailureKind::Busy,
            Self::Abandoned => FailureKind::Abandoned,
        }
    }
}

impl From<EngineError> for PipelineError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Unavailable(msg) => Self::EngineUnavailable(msg),
            EngineError::Threw(msg) => Self::EngineThrew(msg),
        }
    }
}

/// Source file ingestion failures. Raised before anything reaches the pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type '{name}'. Expected one of: .scl, .st, .xml, .il, .awl")]
    UnsupportedExtension { name: String },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_distinct_kinds() {
        let unavailable: PipelineError = EngineError::Unavailable("gone".into()).into();
        let threw: PipelineError = EngineError::Threw("boom".into()).into();
        assert_eq!(unavailable.kind(), FailureKind::EngineUnavailable);
        assert_eq!(threw.kind(), FailureKind::EngineThrew);
        assert!(threw.to_string().contains("boom"));
    }

    #[test]
    fn abandoned_run_has_its_own_kind() {
        let e = PipelineError::Abandoned;
        assert_eq!(e.kind(), FailureKind::Abandoned);
        assert_eq!(serde_json::to_value(e.kind()).unwrap(), "abandoned");
    }
}
