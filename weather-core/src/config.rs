use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_KEY_FILE: &str = "weatherunderground.key";

/// Configuration for a single provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override of the upstream endpoint, e.g. for a proxy or a mock server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Listen address for the HTTP server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// File holding a bare Weather Underground key, read when no key is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    /// Example TOML:
    /// [providers.wunderground]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Load config from an explicit path, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn bind_addr(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn key_file_path(&self) -> &Path {
        self.key_file.as_deref().unwrap_or_else(|| Path::new(DEFAULT_KEY_FILE))
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Set or replace a provider API key.
    pub fn upsert_provider_api_key(&mut self, id: ProviderId, api_key: String) {
        self.providers.entry(id.as_str().to_string()).or_default().api_key = Some(api_key);
    }

    /// Returns the API key for a provider, if present and non-empty.
    pub fn provider_api_key(&self, id: ProviderId) -> Option<&str> {
        self.provider_config(id).and_then(|cfg| cfg.api_key.as_deref()).filter(|k| !k.is_empty())
    }

    pub fn provider_base_url(&self, id: ProviderId) -> Option<&str> {
        self.provider_config(id).and_then(|cfg| cfg.base_url.as_deref())
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.provider_api_key(id).is_some()
    }

    /// Fill in the Weather Underground key from the key file when none is configured.
    ///
    /// A missing or unreadable key file is tolerated: the provider then fails
    /// each query instead of the server failing to start.
    pub fn apply_key_file(&mut self) {
        let id = ProviderId::WeatherUnderground;
        if self.is_provider_configured(id) {
            return;
        }

        let path = self.key_file_path().to_path_buf();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let key = contents.trim();
                if key.is_empty() {
                    tracing::warn!(path = %path.display(), "{id} key file is empty");
                    return;
                }
                tracing::info!(path = %path.display(), "{id} API key loaded");
                self.upsert_provider_api_key(id, key.to_string());
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Unable to read {id} key file");
            }
        }
    }
}
