//! bankerd.toml configuration.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8001"
//! cors_origins = ["http://localhost:3000"]
//!
//! [logging]
//! filter = "info,bankerd=debug,banker_api=debug"
//! format = "json"
//! ```
//!
//! Every key is optional. Precedence, lowest first: defaults, file,
//! `CORS_ORIGINS` environment variable, command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankerdConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8001)),
            cors_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,bankerd=debug,banker_api=debug".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log line encoding on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl BankerdConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `path` if given, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Override the origin list from a comma-separated value
    /// (the `CORS_ORIGINS` convention).
    pub fn apply_cors_env(&mut self, value: Option<&str>) {
        let Some(value) = value else { return };
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if !origins.is_empty() {
            self.server.cors_origins = origins;
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = BankerdConfig::load(None).unwrap();
        assert_eq!(config.server.bind.port(), 8001);
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
        assert!(config.logging.filter.starts_with("info"));
    }

    #[test]
    fn parse_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankerd.toml");
        std::fs::write(
            &path,
            r#"
[server]
bind = "127.0.0.1:9000"
"#,
        )
        .unwrap();

        let config = BankerdConfig::from_file(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn json_log_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankerd.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let config = BankerdConfig::from_file(&path).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.filter.starts_with("info"));

        std::fs::write(&path, "[logging]\nformat = \"yaml\"\n").unwrap();
        assert!(matches!(BankerdConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BankerdConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bankerd.toml");
        std::fs::write(&path, "[server]\nbind = 42\n").unwrap();
        assert!(matches!(BankerdConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn cors_env_overrides_origins() {
        let mut config = BankerdConfig::default();
        config.apply_cors_env(Some("http://a.test, http://b.test,"));
        assert_eq!(
            config.server.cors_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );

        config.apply_cors_env(Some(" , "));
        assert_eq!(config.server.cors_origins.len(), 2);

        config.apply_cors_env(None);
        assert_eq!(config.server.cors_origins.len(), 2);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = BankerdConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("cors_origins"));
        assert!(text.contains("format = \"text\""));
        let back: BankerdConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
