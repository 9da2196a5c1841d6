//! Server configuration
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! command-line overrides applied by the binary.

use casebook_core::{TensionFilter, PREDEFINED_TENSIONS};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// File that was asked for
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Resolved config could not be rendered
    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Casebook server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Directory holding the collection files
    pub data_dir: PathBuf,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Tension labels left out of tension history
    pub excluded_tensions: Vec<String>,
}

impl ServerConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text; absent keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Tension filter built from `excluded_tensions`
    #[must_use]
    pub fn tension_filter(&self) -> TensionFilter {
        TensionFilter::new(self.excluded_tensions.iter().cloned())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            log_filter: "info".to_string(),
            log_json: false,
            excluded_tensions: PREDEFINED_TENSIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_keys() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            log_json = true
            excluded_tensions = ["A vs. B"]
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.log_json);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.tension_filter().excludes("A vs. B"));
        assert!(!config.tension_filter().excludes("Privacy vs. Transparency"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ServerConfig::from_toml_str("port = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = ServerConfig::new().with_data_dir("/var/lib/casebook");
        let rendered = config.to_toml().unwrap();
        assert_eq!(ServerConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ServerConfig::load(Path::new("/nonexistent/casebook.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/casebook.toml"));
    }
}
