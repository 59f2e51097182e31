// src/cli/handlers/mod.rs
//! Analysis command handlers.

use crate::config::{Config, OutputFormat};
use crate::engine::ProcessEngine;
use crate::error::FailureKind;
use crate::exit::PlcguardExit;
use crate::pipeline::Orchestrator;
use crate::reporting::{self, JsonReport};
use crate::source::SourceFile;
use crate::types::AnalysisReport;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub file: PathBuf,
    pub policy: Option<PathBuf>,
    pub engine: Option<String>,
    pub json: bool,
}

/// Handles the check command: ingest, run the engine once, render.
///
/// # Errors
/// Returns error if the policy file cannot be read or the engine command
/// cannot be parsed.
pub fn handle_check(args: &CheckArgs) -> Result<PlcguardExit> {
    let mut config = Config::load();
    if args.json {
        config.report.format = OutputFormat::Json;
    }

    let source = match SourceFile::read(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(PlcguardExit::InvalidInput);
        }
    };

    let policy = args
        .policy
        .as_ref()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read policy {}", p.display())))
        .transpose()?;

    let engine = match &args.engine {
        Some(line) => ProcessEngine::from_command_line(line).context("invalid --engine command")?,
        None => ProcessEngine::new(config.engine_command()?),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let orchestrator = Orchestrator::new(engine);
    orchestrator.load_source(source.clone())?;
    orchestrator.set_policy(policy);
    let outcome = runtime.block_on(orchestrator.analyze());

    if let Err(e) = &outcome {
        if e.kind() == FailureKind::InputMissing {
            eprintln!("{} {e}", "Error:".red());
            return Ok(PlcguardExit::InvalidInput);
        }
    }

    let state = orchestrator.state();
    match config.report.format {
        OutputFormat::Json => reporting::print_json(&JsonReport::new(&state, Some(&source)))?,
        OutputFormat::Text => reporting::print_report(&state, Some(&source), &config.report),
    }

    Ok(exit_for(&outcome))
}

fn exit_for(outcome: &crate::error::Result<Arc<AnalysisReport>>) -> PlcguardExit {
    match outcome {
        Ok(report) if report.results.has_violations() => PlcguardExit::CheckFailed,
        Ok(_) => PlcguardExit::Success,
        Err(e) if e.kind() == FailureKind::InputMissing => PlcguardExit::InvalidInput,
        Err(_) => PlcguardExit::Error,
    }
}

/// Handles the config command.
///
/// # Errors
/// Returns error if the configuration cannot be serialized.
pub fn handle_config() -> Result<PlcguardExit> {
    let config = Config::load();
    print!("{}", config.to_toml()?);
    Ok(PlcguardExit::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::results;

    #[test]
    fn exit_codes_follow_outcome() {
        let clean = Arc::new(results::process("[]").unwrap());
        let dirty = Arc::new(
            results::process(r#"[{"status":"NOT_FOLLOWED","rule_no":3,"rule_name":"X"}]"#).unwrap(),
        );
        assert_eq!(exit_for(&Ok(clean)), PlcguardExit::Success);
        assert_eq!(exit_for(&Ok(dirty)), PlcguardExit::CheckFailed);
        assert_eq!(exit_for(&Err(PipelineError::InputMissing)), PlcguardExit::InvalidInput);
        assert_eq!(
            exit_for(&Err(PipelineError::MalformedOutput("x".into()))),
            PlcguardExit::Error
        );
    }
}
