// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{CommandEntry, Config, EngineConfig, OutputFormat, PlcguardToml, ReportConfig};

use anyhow::{Context, Result};
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config and applies `plcguard.toml` from the working directory.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::new();
        config.load_local_config();
        config
    }

    /// Creates a config and applies `plcguard.toml` from `dir`.
    #[must_use]
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Self::new();
        io::load_toml_config(&mut config, dir);
        config
    }

    pub fn load_local_config(&mut self) {
        let dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
        io::load_toml_config(self, &dir);
    }

    /// Applies TOML text over the defaults. Malformed text is logged and ignored.
    pub fn parse_toml(&mut self, content: &str) {
        io::parse_toml(self, content);
    }

    /// Program and arguments of the configured engine.
    ///
    /// # Errors
    /// Returns error if the command string has unbalanced quotes.
    pub fn engine_command(&self) -> Result<Vec<String>> {
        self.engine
            .command
            .clone()
            .into_words()
            .context("invalid [engine] command in plcguard.toml")
    }

    /// Renders the effective settings as `plcguard.toml` text.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        let file = PlcguardToml {
            engine: self.engine.clone(),
            report: self.report.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}
