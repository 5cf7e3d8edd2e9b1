//! Configuration handling for the app

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the contact form app
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Delay before an edited email field is re-validated, in ms
    pub debounce_ms: Option<u64>,
    /// Simulated transport latency, in ms
    pub transport_latency_ms: Option<u64>,
    /// Force the simulated transport to fail with this reason
    pub transport_failure: Option<String>,
}

#[allow(dead_code)]
impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "intake", "intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.debounce_ms.is_none());
        assert!(config.transport_latency_ms.is_none());
        assert!(config.transport_failure.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig {
            debounce_ms: Some(250),
            transport_latency_ms: Some(1000),
            transport_failure: Some("Server unavailable".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.debounce_ms, Some(250));
        assert_eq!(parsed.transport_latency_ms, Some(1000));
        assert_eq!(
            parsed.transport_failure.as_deref(),
            Some("Server unavailable")
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"debounce_ms": 100, "theme": "dark"}"#).unwrap();
        assert_eq!(parsed.debounce_ms, Some(100));
    }
}
