//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-target log directives,
/// e.g. `PLCGUARD_LOG=plcguard_core::engine=debug`.
pub const LOG_ENV: &str = "PLCGUARD_LOG";

/// Initializes the global subscriber. Output goes to stderr so JSON on
/// stdout stays parseable.
///
/// Reads `PLCGUARD_LOG`; falls back to `warn`, or `info` when `verbose`.
/// Idempotent.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "plcguard_core=info,plcguard=info"
        } else {
            "plcguard_core=warn,plcguard=warn"
        };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose),
            )
            .with(filter)
            .init();
    });
}
