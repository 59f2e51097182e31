// src/config/io.rs
use super::types::{Config, PlcguardToml};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "plcguard.toml";

pub fn load_toml_config(config: &mut Config, dir: &Path) {
    let path = dir.join(CONFIG_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_toml(config, &content);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read config; using defaults");
        }
    }
}

pub fn parse_toml(config: &mut Config, content: &str) {
    match toml::from_str::<PlcguardToml>(content) {
        Ok(parsed) => {
            config.engine = parsed.engine;
            config.report = parsed.report;
        }
        Err(e) => {
            tracing::warn!(error = %e, "invalid {CONFIG_FILE}; using defaults");
        }
    }
}
