//! Report rendering for a finished analysis.
//!
//! `console` produces the human-readable report; `print_json` serializes any
//! view model for machine consumption.

pub mod console;
mod shared;

pub use console::{print_report, render_report};

use crate::pipeline::ViewState;
use crate::source::SourceFile;
use anyhow::Result;
use serde::Serialize;

/// JSON payload for `plcguard check --json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<&'a str>,
    #[serde(flatten)]
    pub state: &'a ViewState,
}

impl<'a> JsonReport<'a> {
    #[must_use]
    pub fn new(state: &'a ViewState, source: Option<&'a SourceFile>) -> Self {
        Self {
            file: source.map(SourceFile::name),
            state,
        }
    }
}

/// Prints any serializable value as pretty JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
