use clap::Parser;
use colored::Colorize;
use plcguard_core::cli::{self, Cli};
use plcguard_core::exit::PlcguardExit;
use plcguard_core::logging;

fn main() -> PlcguardExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(PlcguardExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            PlcguardExit::Error
        }
    }
}
