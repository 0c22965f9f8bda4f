use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use url::Url;
use wizard_core::{AddressMode, FormLayout};
use wizard_engine::{EncodeSettings, EngineSettings, SubmitSettings};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./registration.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub max_bytes: u64,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            max_bytes: EncodeSettings::default().max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        let defaults = SubmitSettings::default();
        Self {
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            max_response_bytes: defaults.max_response_bytes,
        }
    }
}

/// Contents of `registration.ron`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Endpoint the completed form is posted to.
    pub action_url: String,
    pub address_mode: AddressMode,
    pub encode: EncodeConfig,
    pub submit: SubmitConfig,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            action_url: "http://localhost:5000/register/anonymous".to_string(),
            address_mode: AddressMode::default(),
            encode: EncodeConfig::default(),
            submit: SubmitConfig::default(),
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn action(&self) -> anyhow::Result<Url> {
        Url::parse(&self.action_url)
            .with_context(|| format!("invalid action_url {:?}", self.action_url))
    }

    pub fn layout(&self) -> FormLayout {
        FormLayout::registration(self.address_mode)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            encode: EncodeSettings {
                max_bytes: self.encode.max_bytes,
            },
            submit: SubmitSettings {
                connect_timeout: Duration::from_millis(self.submit.connect_timeout_ms),
                request_timeout: Duration::from_millis(self.submit.request_timeout_ms),
                max_response_bytes: self.submit.max_response_bytes,
            },
        }
    }
}

/// Loads the config file; a missing file yields the defaults.
pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()));
        }
    };

    let config: AppConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.action()?;
    Ok(config)
}
