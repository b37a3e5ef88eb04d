//! Configuration management for truestory
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TMDB client configuration
    #[serde(default)]
    pub tmdb: TmdbConfig,

    /// Wikipedia client configuration
    #[serde(default)]
    pub wikipedia: WikipediaConfig,

    /// Enrichment pipeline configuration
    #[serde(default)]
    pub enrich: EnrichConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// TMDB client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API base URL (overridable so tests can point at a local server)
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Environment variable name holding the API key
    #[serde(default = "default_tmdb_api_key_env")]
    pub api_key_env: String,

    /// Minimum delay before each API call in milliseconds
    #[serde(default = "default_tmdb_call_delay_ms")]
    pub call_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Wikipedia client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    /// Base URL (overridable so tests can point at a local server)
    #[serde(default = "default_wikipedia_base_url")]
    pub base_url: String,

    /// Minimum delay before each API call in milliseconds
    #[serde(default = "default_wikipedia_call_delay_ms")]
    pub call_delay_ms: u64,

    /// Number of search results to request when a direct lookup fails
    #[serde(default = "default_wikipedia_search_limit")]
    pub search_limit: u32,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Enrichment pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Maximum number of movies a stage advances per run
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for truestory data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,

    /// Path to SQLite database
    pub db_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            wikipedia: WikipediaConfig::default(),
            enrich: EnrichConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            api_key_env: default_tmdb_api_key_env(),
            call_delay_ms: default_tmdb_call_delay_ms(),
            timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_wikipedia_base_url(),
            call_delay_ms: default_wikipedia_call_delay_ms(),
            search_limit: default_wikipedia_search_limit(),
            timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

impl TmdbConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            Error::Config(format!(
                "TMDB API key not found: set the {} environment variable",
                self.api_key_env
            ))
        })
    }
}

impl Config {
    /// Get the default base directory for truestory (~/.truestory)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".truestory")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            db_file: base.join("movies.db"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Set up paths based on config file location
        let base = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            db_file: base.join("movies.db"),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific base directory, falling back to defaults
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.enrich.batch_size == 0 {
            return Err(Error::Config(
                "enrich.batch_size must be positive".to_string(),
            ));
        }

        if self.tmdb.base_url.is_empty() || self.wikipedia.base_url.is_empty() {
            return Err(Error::Config("API base URLs must not be empty".to_string()));
        }

        if self.wikipedia.search_limit == 0 {
            return Err(Error::Config(
                "wikipedia.search_limit must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.enrich.batch_size, 25);
        assert_eq!(config.tmdb.call_delay_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.enrich.batch_size = 10;

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(loaded.enrich.batch_size, 10);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.enrich.batch_size = 0;
        assert!(config.validate().is_err());

        config.enrich.batch_size = 25;
        assert!(config.validate().is_ok());

        config.tmdb.base_url = String::new();
        assert!(config.validate().is_err());
    }
}
