//! Optional RON config file, layered under CLI flags and over built-in defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokgrab_engine::ConvertSettings;
use tokgrab_logging::grab_info;

use super::cli::Cli;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
}

pub(crate) fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: AppConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    grab_info!("Loaded config from {:?}", path);
    Ok(config)
}

pub(crate) fn resolve_settings(file: AppConfig, cli: &Cli) -> ConvertSettings {
    let defaults = ConvertSettings::default();
    ConvertSettings {
        endpoint: cli
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or(defaults.endpoint),
        connect_timeout: file
            .connect_timeout_secs
            .map(Duration::from_secs)
            .or(defaults.connect_timeout),
        request_timeout: cli
            .timeout
            .or(file.request_timeout_secs)
            .map(Duration::from_secs)
            .or(defaults.request_timeout),
        max_bytes: file.max_bytes.unwrap_or(defaults.max_bytes),
    }
}
