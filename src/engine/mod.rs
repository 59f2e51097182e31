//! Seam to the external rule-checking engine.
//!
//! The engine is opaque: it takes source text, a policy string and a file
//! name, and hands back a JSON string. Its rule logic is not modelled here.

mod process;

pub use process::ProcessEngine;

use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// File name passed to the engine when the caller does not know one.
pub const DEFAULT_FILE_NAME: &str = "uploaded.scl";

/// One call's worth of engine input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub source: String,
    /// Passed through verbatim; empty when no policy was supplied.
    pub policy: String,
    pub file_name: String,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(source: impl Into<String>, policy: Option<&str>, file_name: Option<&str>) -> Self {
        Self {
            source: source.into(),
            policy: policy.unwrap_or_default().to_string(),
            file_name: file_name
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_FILE_NAME)
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Initialization failed or the analyze entry point is missing.
    #[error("{0}")]
    Unavailable(String),
    /// The engine raised while running.
    #[error("{0}")]
    Threw(String),
}

/// An analysis backend.
///
/// `initialize` must be idempotent; the orchestrator calls it before every
/// run and only the first call may do real work.
pub trait Engine: Send + Sync {
    fn initialize(&self) -> impl Future<Output = Result<(), EngineError>> + Send;

    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<String, EngineError>> + Send;
}
