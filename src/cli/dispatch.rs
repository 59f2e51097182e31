//! Command dispatch logic extracted from binary to reduce main function size.

use super::{
    args::Commands,
    handlers::{handle_check, handle_config, CheckArgs},
};
use crate::exit::PlcguardExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<PlcguardExit> {
    match command {
        Commands::Check {
            file,
            policy,
            engine,
            json,
        } => handle_check(&CheckArgs {
            file,
            policy,
            engine,
            json,
        }),
        Commands::Config => handle_config(),
    }
}
