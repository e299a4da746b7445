use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{PilotError, Result};
use crate::transform::{DEFAULT_LATENCY, OutputFormat};

pub const CONFIG_FILE: &str = "config.toml";

/// Upper bound on the simulated latency.
const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub optimizer: OptimizerConfig,
    pub history: HistoryConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub async fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        self.validate()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| PilotError::Config(e.to_string()))?;
        fs::write(data_dir.join(CONFIG_FILE), content).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.history.max_entries == 0 {
            errors.push("history.max_entries must be greater than 0");
        }
        if self.optimizer.delay_ms > MAX_DELAY_MS {
            errors.push("optimizer.delay_ms must be at most 60000");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PilotError::Config(errors.join("; ")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Simulated model latency in milliseconds.
    pub delay_ms: u64,
}

impl OptimizerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_LATENCY.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Refuse to submit until a mode is selected.
    pub require_mode: bool,
    pub default_format: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            require_mode: true,
            default_format: OutputFormat::PlainText,
        }
    }
}

/// Locations inside the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub store_dir: PathBuf,
}

impl DataPaths {
    pub const DEFAULT_DIR: &'static str = ".prompt-pilot";

    pub fn new(root: PathBuf) -> Self {
        Self {
            config_file: root.join(CONFIG_FILE),
            store_dir: root.join("store"),
            root,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.root, &self.store_dir] {
            fs::create_dir_all(dir).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.optimizer.delay(), Duration::from_millis(1500));
        assert_eq!(config.history.max_entries, 10);
        assert!(config.session.require_mode);
        assert_eq!(config.session.default_format, OutputFormat::PlainText);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = AppConfig::default();
        config.history.max_entries = 0;
        config.optimizer.delay_ms = MAX_DELAY_MS + 1;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_entries"));
        assert!(err.contains("delay_ms"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[optimizer]\ndelay_ms = 0\n").unwrap();
        assert_eq!(config.optimizer.delay_ms, 0);
        assert_eq!(config.history.max_entries, 10);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path()).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.history.max_entries = 3;
        config.session.default_format = OutputFormat::Markdown;
        config.save(dir.path()).await.unwrap();

        let loaded = AppConfig::load(dir.path()).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[history]\nmax_entries = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(dir.path()).await,
            Err(PilotError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_data_paths() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path().join("data"));
        assert!(!paths.is_initialized());

        paths.ensure_dirs().await.unwrap();
        assert!(paths.store_dir.is_dir());

        AppConfig::default().save(&paths.root).await.unwrap();
        assert!(paths.is_initialized());
    }
}
