//! Application configuration.
//!
//! Read from an optional TOML file, then overridden by environment
//! variables. Every field has a default, so an empty file is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use corpora_embedding::OllamaConfig;
use corpora_graph::GraphConfig;
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "corpora.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub graph: GraphConfig,
    pub embedding: OllamaConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("corpora.db"),
        }
    }
}

impl AppConfig {
    /// Load `path`, or `corpora.toml` if it exists, then apply the environment.
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CORPORA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CORPORA_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("CORPORA_PORT is not a port number: {}", port))?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(uri) = lookup("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Some(user) = lookup("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
        if let Some(database) = lookup("NEO4J_DB") {
            self.graph.database = database;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            self.embedding.url = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.embedding.model = model;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3030);
        assert_eq!(config.graph.uri, "neo4j://127.0.0.1:7687");
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8000

            [graph]
            uri = "memory://"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.graph.is_in_memory());
        assert_eq!(config.graph.user, "neo4j");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CORPORA_PORT", "9000"),
            ("DATABASE_PATH", "/tmp/c.db"),
            ("NEO4J_PASSWORD", "secret"),
            ("OLLAMA_MODEL", "bge-m3"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.path, PathBuf::from("/tmp/c.db"));
        assert_eq!(config.graph.password, "secret");
        assert_eq!(config.embedding.model, "bge-m3");
        assert_eq!(config.graph.user, "neo4j");
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| (key == "CORPORA_PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/corpora.toml"))).is_err());
    }
}
