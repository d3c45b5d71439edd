//! Configuration management for legalbrief using the prefer crate.
//!
//! Precedence, lowest to highest: built-in defaults, the config file
//! (discovered by prefer or given with `--config`), environment variables,
//! command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::LlmConfig;
use crate::repository::DbContext;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "documents.db";

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default multipart upload limit (32 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// `[server]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address: `PORT`, `HOST`, or `HOST:PORT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Maximum accepted request body for uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
}

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full database URL (`sqlite:...`). Takes precedence over `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// SQLite file path, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer for discovery.
    ///
    /// Falls back to defaults when no `legalbrief` config file is found or
    /// the discovered file cannot be parsed.
    pub async fn load() -> Self {
        let path = match prefer::load("legalbrief").await {
            Ok(pref_config) => pref_config.source_path().map(|p| p.to_path_buf()),
            Err(e) => {
                tracing::debug!("No config file discovered: {}", e);
                None
            }
        };

        match path {
            Some(path) => match Self::load_from_path(&path).await {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("{}; using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// The format follows the extension: TOML, YAML, or JSON (default).
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(path, &contents)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_error("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_error("JSON", e.to_string())),
        }
    }

    /// Directory used to resolve relative paths: the config file's directory.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve settings from this config plus environment overrides.
    pub fn into_settings(self) -> Settings {
        let base_dir = self.base_dir();

        let mut database_url = match (&self.database.url, &self.database.path) {
            (Some(url), _) => url.clone(),
            (None, Some(path)) => sqlite_url(&resolve_path(path, base_dir.as_deref())),
            (None, None) => sqlite_url(Path::new(DEFAULT_DATABASE_PATH)),
        };
        if let Some(url) = env_non_empty("DATABASE_URL") {
            tracing::debug!("Using DATABASE_URL from environment: {}", url);
            database_url = url;
        }

        let bind = env_non_empty("LEGALBRIEF_BIND")
            .or(self.server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Settings {
            database_url,
            bind,
            max_upload_bytes: self
                .server
                .max_upload_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            llm: self.llm.with_env_overrides(),
        }
    }
}

/// Application settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite database URL.
    pub database_url: String,
    /// Listen address as configured; parsed by the serve command.
    pub bind: String,
    /// Multipart upload limit in bytes.
    pub max_upload_bytes: usize,
    /// Generation service settings.
    pub llm: LlmConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: sqlite_url(Path::new(DEFAULT_DATABASE_PATH)),
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            llm: LlmConfig::default(),
        }
    }
}

impl Settings {
    /// Create a database context for these settings.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url)
    }
}

/// Load settings, either from an explicit config file or by discovery.
pub async fn load_settings(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };
    Ok(config.into_settings())
}

fn sqlite_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

fn resolve_path(path_str: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(path_str);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_toml() {
        let config = Config::parse(
            Path::new("legalbrief.toml"),
            r#"
            [server]
            bind = "0.0.0.0:8080"
            max_upload_bytes = 1048576

            [database]
            path = "data/docs.db"

            [llm]
            temperature = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.server.max_upload_bytes, Some(1048576));
        assert_eq!(config.database.path.as_deref(), Some("data/docs.db"));
        assert_eq!(config.llm.temperature, 0.1);
        assert_eq!(config.llm.max_output_tokens, LlmConfig::default().max_output_tokens);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = Config::parse(
            Path::new("legalbrief.yaml"),
            "server:\n  bind: \"9000\"\n",
        )
        .unwrap();
        assert_eq!(yaml.server.bind.as_deref(), Some("9000"));

        let json = Config::parse(
            Path::new("legalbrief.json"),
            r#"{"database": {"url": "sqlite:/tmp/x.db"}}"#,
        )
        .unwrap();
        assert_eq!(json.database.url.as_deref(), Some("sqlite:/tmp/x.db"));
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = Config::parse(Path::new("bad.toml"), "server = [").unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }

    #[tokio::test]
    async fn test_relative_database_path_resolves_against_config_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legalbrief.toml");
        std::fs::write(&path, "[database]\npath = \"docs.db\"\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.base_dir().as_deref(), Some(dir.path()));

        // DATABASE_URL may be set in the environment running the tests.
        if std::env::var("DATABASE_URL").is_err() {
            let settings = config.into_settings();
            assert_eq!(
                settings.database_url,
                format!("sqlite:{}", dir.path().join("docs.db").display())
            );
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/legalbrief.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.database_url, "sqlite:documents.db");
        assert_eq!(settings.bind, DEFAULT_BIND);
        assert_eq!(settings.max_upload_bytes, 32 * 1024 * 1024);
    }
}
