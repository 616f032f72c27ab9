use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Endpoint used when no config file exists
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000/upload/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Conversion service upload endpoint
    #[serde(default = "default_service_url")]
    pub service_url: String,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".csv2dml-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_service() {
        assert_eq!(Config::default().service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_missing_field_falls_back_to_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config {
            service_url: "https://converter.internal/upload/".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.service_url, config.service_url);
    }

    #[test]
    fn test_save_creates_file_load_reads_it_back() {
        // Point HOME at a fresh directory so save() creates the config
        // dir and file from scratch. No other test reads HOME.
        let home = tempfile::tempdir().unwrap();
        env::set_var("HOME", home.path());

        assert!(Config::load().is_none());

        let config = Config {
            service_url: "https://converter.internal/upload/".to_string(),
        };
        config.save().unwrap();

        assert!(home
            .path()
            .join(".csv2dml-tui")
            .join("config.json")
            .exists());

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.service_url, config.service_url);
    }
}
