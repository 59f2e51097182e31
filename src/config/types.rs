use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Checker executable and its arguments.
    #[serde(default = "default_command")]
    pub command: CommandEntry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}

fn default_command() -> CommandEntry {
    CommandEntry::Single("plc_secure_checker --json".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Print the offending source line under each violation.
    #[serde(default = "default_true")]
    pub show_source: bool,
    /// List the rules that passed.
    #[serde(default = "default_true")]
    pub show_followed: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_source: true,
            show_followed: true,
        }
    }
}

const fn default_true() -> bool { true }

/// A command given either as one shell-quoted string or as a list of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandEntry {
    Single(String),
    List(Vec<String>),
}

impl CommandEntry {
    /// Splits into program and arguments.
    ///
    /// # Errors
    /// Returns an error if a single-string command has unbalanced quotes.
    pub fn into_words(self) -> Result<Vec<String>, shell_words::ParseError> {
        match self {
            Self::Single(s) => shell_words::split(&s),
            Self::List(l) => Ok(l),
        }
    }
}

/// On-disk shape of `plcguard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlcguardToml {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub engine: EngineConfig,
    pub report: ReportConfig,
}
