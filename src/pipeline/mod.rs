//! Analysis orchestrator.
//!
//! A small state machine: `Idle -> Loading -> {Success, Failure}`, back to
//! `Idle` on reset or when a new file is loaded. At most one run is in flight;
//! a run is never cancelled once it starts. The current `ViewState` is
//! published through a `watch` channel and replaced whole on every
//! transition. A run whose future is dropped before it finishes is published
//! as an abandoned `Failure`, so `Loading` never outlives its caller.

mod state;

pub use state::{Failure, Phase, ViewState};

use crate::engine::{AnalysisRequest, Engine};
use crate::error::{PipelineError, Result};
use crate::results;
use crate::source::SourceFile;
use crate::types::AnalysisReport;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Debug, Default)]
struct Input {
    source: Option<SourceFile>,
    policy: Option<String>,
}

pub struct Orchestrator<E> {
    engine: E,
    input: Mutex<Input>,
    state: watch::Sender<ViewState>,
}

impl<E: Engine> Orchestrator<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        let (state, _) = watch::channel(ViewState::idle());
        Self {
            engine,
            input: Mutex::new(Input::default()),
            state,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Snapshot of the current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Replaces the loaded source and discards any previous results.
    ///
    /// # Errors
    /// Returns `Busy` while a run is loading.
    pub fn load_source(&self, file: SourceFile) -> Result<()> {
        self.ensure_not_loading()?;
        tracing::debug!(file = file.name(), "source loaded");
        self.lock_input().source = Some(file);
        self.state.send_replace(ViewState::idle());
        Ok(())
    }

    /// Sets the policy passed verbatim to the engine on the next run.
    /// Blank text means no policy.
    pub fn set_policy(&self, policy: Option<String>) {
        self.lock_input().policy = policy.filter(|p| !p.trim().is_empty());
    }

    /// Clears source, policy and results.
    ///
    /// # Errors
    /// Returns `Busy` while a run is loading.
    pub fn reset(&self) -> Result<()> {
        self.ensure_not_loading()?;
        *self.lock_input() = Input::default();
        self.state.send_replace(ViewState::idle());
        tracing::debug!("pipeline reset");
        Ok(())
    }

    /// Runs one analysis to completion.
    ///
    /// On success the new report is published and returned. Fatal errors are
    /// published as a `Failure` state and also returned.
    ///
    /// # Errors
    /// `InputMissing` and `Busy` are returned without any state change. The
    /// engine and output errors leave the state in `Failure`. Dropping the
    /// returned future mid-run leaves `Failure` with kind `Abandoned`.
    pub async fn analyze(&self) -> Result<Arc<AnalysisReport>> {
        let request = self.request()?;
        let Some(guard) = self.begin() else {
            tracing::debug!("analyze ignored: a run is already loading");
            return Err(PipelineError::Busy);
        };
        tracing::info!(file = %request.file_name, bytes = request.source.len(), "analysis started");

        match self.run(&request).await {
            Ok(report) => {
                let report = Arc::new(report);
                tracing::info!(
                    followed = report.results.followed.len(),
                    violations = report.results.violations.len(),
                    policy_errors = report.results.errors.len(),
                    percent = report.summary.percent,
                    "analysis finished"
                );
                guard.finish(ViewState::success(Arc::clone(&report)));
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "analysis failed");
                let next = self.state.borrow().failure(&e);
                guard.finish(next);
                Err(e)
            }
        }
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        self.engine
            .initialize()
            .await
            .map_err(|e| PipelineError::EngineUnavailable(e.to_string()))?;
        let raw = self.engine.analyze(request).await?;
        results::process(&raw)
    }

    fn request(&self) -> Result<AnalysisRequest> {
        let input = self.lock_input();
        match input.source.as_ref() {
            Some(file) if !file.is_empty() => Ok(AnalysisRequest::new(
                file.text(),
                input.policy.as_deref(),
                Some(file.name()),
            )),
            _ => Err(PipelineError::InputMissing),
        }
    }

    /// Atomically moves to `Loading`. Returns `None` if already loading.
    fn begin(&self) -> Option<LoadingGuard<'_>> {
        let started = self.state.send_if_modified(|current| {
            if current.is_loading() {
                return false;
            }
            *current = current.loading();
            true
        });
        started.then(|| LoadingGuard {
            state: &self.state,
            finished: false,
        })
    }

    fn ensure_not_loading(&self) -> Result<()> {
        if self.state.borrow().is_loading() {
            Err(PipelineError::Busy)
        } else {
            Ok(())
        }
    }

    fn lock_input(&self) -> MutexGuard<'_, Input> {
        self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the `Loading` phase of one run. Publishes the terminal state through
/// `finish`; if dropped first, publishes `Abandoned`.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ViewState>,
    finished: bool,
}

impl LoadingGuard<'_> {
    fn finish(mut self, next: ViewState) {
        self.finished = true;
        self.state.send_replace(next);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!("analysis abandoned before it finished");
        let next = self.state.borrow().failure(&PipelineError::Abandoned);
        self.state.send_replace(next);
    }
}
