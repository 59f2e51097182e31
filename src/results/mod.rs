//! Pure transforms from raw engine output to view models.
//!
//! `process` runs the full chain: parse, normalize, dedup, partition,
//! aggregate. Each stage is also usable on its own.

pub mod aggregate;
pub mod dedup;
pub mod normalize;
pub mod partition;

pub use aggregate::{compliance, frequency};
pub use dedup::dedup;
pub use normalize::normalize;
pub use partition::{partition, sort_violations};

use crate::error::{PipelineError, Result};
use crate::types::{AnalysisReport, RawEntry};
use serde_json::Value;

/// Parses the engine's JSON text into raw entries.
///
/// # Errors
/// Returns `MalformedOutput` when the text is not JSON, is not an array, or
/// holds an entry that does not fit either record shape.
pub fn parse(raw: &str) -> Result<Vec<RawEntry>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| PipelineError::MalformedOutput(format!("not valid JSON ({e})")))?;

    if !value.is_array() {
        return Err(PipelineError::MalformedOutput(describe_non_array(&value)));
    }
    serde_json::from_value(value)
        .map_err(|e| PipelineError::MalformedOutput(format!("unexpected result record ({e})")))
}

/// The engine wraps its own parse failures as `{"error": "..."}`.
fn describe_non_array(value: &Value) -> String {
    if let Some(msg) = value.get("error").and_then(Value::as_str) {
        return format!("engine reported: {msg}");
    }
    format!("expected a JSON array, got {}", json_type(value))
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turns raw engine output into a complete report.
///
/// # Errors
/// Returns `MalformedOutput` if parsing fails. Nothing after parsing can fail.
pub fn process(raw: &str) -> Result<AnalysisReport> {
    let entries = parse(raw)?;
    let received = entries.len();

    let unique = dedup(normalize(entries));
    tracing::debug!(received, unique = unique.len(), "normalized engine output");

    let results = partition(unique);
    let summary = compliance(&results.violations);
    let frequency = frequency(&results.violations);

    Ok(AnalysisReport {
        results,
        summary,
        frequency,
    })
}
