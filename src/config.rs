use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::stats::WatchtimeEstimate;

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "CINELOG_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_activity_limit")]
    pub recent_activity_limit: usize,

    #[serde(default = "default_movie_minutes")]
    pub movie_runtime_fallback_minutes: i64,

    #[serde(default = "default_episode_minutes")]
    pub episode_runtime_fallback_minutes: i64,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinelog");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("cinelog.db").to_string_lossy().to_string()
}

fn default_activity_limit() -> usize {
    10
}

fn default_movie_minutes() -> i64 {
    WatchtimeEstimate::default().movie_minutes
}

fn default_episode_minutes() -> i64 {
    WatchtimeEstimate::default().episode_minutes
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            db_path: default_db_path(),
            recent_activity_limit: default_activity_limit(),
            movie_runtime_fallback_minutes: default_movie_minutes(),
            episode_runtime_fallback_minutes: default_episode_minutes(),
        }
    }
}

impl Config {
    /// Loads the config file, writing defaults on first run.
    pub fn load() -> StoreResult<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cinelog")
            .join("config.toml")
    }

    pub fn watchtime_estimate(&self) -> WatchtimeEstimate {
        WatchtimeEstimate {
            movie_minutes: self.movie_runtime_fallback_minutes,
            episode_minutes: self.episode_runtime_fallback_minutes,
        }
    }

    fn validate(&self) -> StoreResult<()> {
        if self.backend == Backend::Sqlite && self.db_path.trim().is_empty() {
            return Err(StoreError::Config(
                "db_path is required for the sqlite backend".to_string(),
            ));
        }
        if self.movie_runtime_fallback_minutes < 0 || self.episode_runtime_fallback_minutes < 0 {
            return Err(StoreError::Config(
                "runtime fallbacks cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = \"memory\"\nrecent_activity_limit = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.recent_activity_limit, 5);
        assert_eq!(config.movie_runtime_fallback_minutes, 120);
        assert_eq!(config.watchtime_estimate(), WatchtimeEstimate::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            db_path: dir.path().join("db.sqlite").to_string_lossy().to_string(),
            episode_runtime_fallback_minutes: 45,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.db_path, config.db_path);
        assert_eq!(loaded.episode_runtime_fallback_minutes, 45);
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = \"mongodb\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(StoreError::Toml(_))));
    }

    #[test]
    fn test_rejects_negative_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "movie_runtime_fallback_minutes = -1\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(StoreError::Config(_))));
    }
}
