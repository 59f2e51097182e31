use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plcguard",
    version,
    about = "Checks PLC source against the Top 20 secure coding practices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a PLC source file (.scl, .st, .xml, .il, .awl)
    Check {
        /// Source file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Access/pairing policy JSON, passed to the engine as-is
        #[arg(long, short, value_name = "FILE")]
        policy: Option<PathBuf>,
        /// Engine command line, overriding [engine] command
        #[arg(long, value_name = "CMD")]
        engine: Option<String>,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}
