// src/exit.rs
//! Standardized process exit codes for `plcguard`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlcguardExit {
    /// Analysis completed and no rule was violated.
    Success = 0,
    /// Generic error (engine failure, malformed engine output, config).
    Error = 1,
    /// Input validation failed (missing or unsupported source file).
    InvalidInput = 2,
    /// Analysis completed and at least one rule was violated.
    CheckFailed = 6,
}

impl PlcguardExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for PlcguardExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
