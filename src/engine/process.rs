//! Engine backed by an external checker executable.
//!
//! The request is written to the child's stdin as one JSON object and the
//! raw result is read from its stdout.

use super::{AnalysisRequest, Engine, EngineError};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::OnceCell;

#[derive(Debug)]
pub struct ProcessEngine {
    command: Vec<String>,
    resolved: OnceCell<Result<PathBuf, EngineError>>,
}

impl ProcessEngine {
    /// `command` is the program followed by its arguments.
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            resolved: OnceCell::new(),
        }
    }

    /// Splits a command line using POSIX shell quoting rules.
    ///
    /// # Errors
    /// Returns an error if the quoting is unbalanced.
    pub fn from_command_line(line: &str) -> Result<Self, shell_words::ParseError> {
        Ok(Self::new(shell_words::split(line)?))
    }

    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }

    async fn program(&self) -> Result<PathBuf, EngineError> {
        self.resolved
            .get_or_init(|| async { resolve_program(&self.command) })
            .await
            .clone()
    }
}

impl Engine for ProcessEngine {
    async fn initialize(&self) -> Result<(), EngineError> {
        self.program().await.map(|_| ())
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, EngineError> {
        let program = self.program().await?;
        let payload = serde_json::to_vec(request)
            .map_err(|e| EngineError::Threw(format!("could not encode request: {e}")))?;

        let start = Instant::now();
        let mut child = Command::new(&program)
            .args(self.command.iter().skip(1))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EngineError::Threw(format!("failed to start {}: {e}", program.display())))?;

        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|e| EngineError::Threw(format!("engine did not finish: {e}")))?;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(
            program = %program.display(),
            exit_code = output.status.code().unwrap_or(-1),
            duration_ms,
            "engine process finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(EngineError::Threw(if detail.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                detail.to_string()
            }));
        }
        // An engine that ignores stdin may close it early; that is not a failure.
        if let Err(e) = written {
            tracing::debug!(error = %e, "engine closed stdin before the request was written");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn resolve_program(command: &[String]) -> Result<PathBuf, EngineError> {
    let Some(program) = command.first().filter(|p| !p.trim().is_empty()) else {
        return Err(EngineError::Unavailable(
            "no engine command configured (set [engine] command in plcguard.toml or pass --engine)"
                .to_string(),
        ));
    };

    let found = if Path::new(program).components().count() > 1 {
        let path = PathBuf::from(program);
        path.is_file().then_some(path)
    } else {
        search_path(program)
    };

    match found {
        Some(path) => {
            tracing::debug!(program = %path.display(), "resolved engine executable");
            Ok(path)
        }
        None => Err(EngineError::Unavailable(format!(
            "engine executable '{program}' was not found"
        ))),
    }
}

fn search_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            return exe.is_file().then_some(exe);
        }
        None
    })
}
