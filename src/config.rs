//! Configuration types for the search-and-analyse pipeline.

use querylens_search::FetcherConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{QueryLensError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search endpoint, timeouts, User-Agent and cache policy.
    pub search: FetcherConfig,
    /// Text preprocessing limits.
    pub text: TextConfig,
    /// Word-frequency and entity ranking limits.
    pub analysis: AnalysisConfig,
    /// Browser UI server settings.
    pub server: ServerConfig,
}

/// Text processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Inputs longer than this many bytes take the fallback path.
    pub max_input_bytes: usize,
    /// Number of sentences kept in a summary.
    pub summary_sentences: usize,
    /// Characters kept by the truncation fallback summary.
    pub fallback_summary_chars: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024,
            summary_sentences: 3,
            fallback_summary_chars: 500,
        }
    }
}

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most frequent words kept.
    pub top_words: usize,
    /// Number of most frequent entities kept per entity type.
    pub top_entities: usize,
    /// Aggregated snippet text longer than this many bytes makes the whole
    /// analysis unavailable.
    pub max_input_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_words: 20,
            top_entities: 5,
            max_input_bytes: 1024 * 1024,
        }
    }
}

/// Browser UI server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8501,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| QueryLensError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| QueryLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/querylens/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("querylens").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("querylens")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/querylens-config.toml")
        }
    }

    /// Load the config at `path`, or at [`AppConfig::default_config_path`]
    /// if that file exists, or fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be loaded, or if
    /// an existing default file is invalid.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`QueryLensError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .map_err(|e| QueryLensError::Config(e.to_string()))?;
        if self.text.max_input_bytes == 0 {
            return Err(QueryLensError::Config(
                "text.max_input_bytes must be greater than 0".into(),
            ));
        }
        if self.text.summary_sentences == 0 {
            return Err(QueryLensError::Config(
                "text.summary_sentences must be greater than 0".into(),
            ));
        }
        if self.analysis.top_words == 0 || self.analysis.top_entities == 0 {
            return Err(QueryLensError::Config(
                "analysis.top_words and analysis.top_entities must be greater than 0".into(),
            ));
        }
        if self.analysis.max_input_bytes == 0 {
            return Err(QueryLensError::Config(
                "analysis.max_input_bytes must be greater than 0".into(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(QueryLensError::Config("server.host must not be empty".into()));
        }
        Ok(())
    }

    /// The fetcher section, ready to hand to [`querylens_search::Fetcher::new`].
    pub fn fetcher_config(&self) -> FetcherConfig {
        self.search.clone()
    }
}
