//! Server configuration module

use anyhow::{Context, Result};
use ner_sidecar::config::{ConfigLoader, SidecarConfig};
use ner_sidecar::logging::parse_log_level;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::cli::CliArgs;

/// Default port the sidecar listens on
pub const DEFAULT_PORT: u16 = 8099;

/// Default bind address; the sidecar only serves its own host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Library configuration file (TOML, YAML or JSON)
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Model identifier override
    pub model: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_request_size: 16 * 1024 * 1024, // 16MB
            config_file: None,
            log_level: None,
            model: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: CliArgs) -> Result<Self> {
        Self::from_cli_and_lookup(cli_args, |key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_cli_and_env`] with an explicit variable lookup.
    pub fn from_cli_and_lookup<F>(cli_args: CliArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Some(port) = lookup("NER_SIDECAR_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid NER_SIDECAR_PORT '{}'", port))?;
        }

        if let Some(host) = cli_args.host {
            config.host = host;
        } else if let Some(host) = lookup("NER_SIDECAR_HOST") {
            config.host = host;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Some(max_size) = lookup("NER_SIDECAR_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size
                .parse()
                .with_context(|| format!("invalid NER_SIDECAR_MAX_REQUEST_SIZE '{}'", max_size))?;
        }

        config.config_file = cli_args
            .config_file
            .or_else(|| lookup("NER_SIDECAR_CONFIG_FILE").map(PathBuf::from));

        config.log_level = cli_args.log_level.or_else(|| lookup("NER_SIDECAR_LOG_LEVEL"));

        config.model = cli_args
            .model
            .or_else(|| lookup("NER_SIDECAR_MODEL"))
            .filter(|model| !model.trim().is_empty());

        Ok(config)
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the library configuration and apply the server overrides.
    ///
    /// An explicit config file must exist and parse; without one the default
    /// file locations are searched. `NER_SIDECAR_*` nested variables are merged
    /// next, then the model and log level overrides from CLI or environment.
    pub fn sidecar_config(&self) -> Result<SidecarConfig> {
        let mut loader = ConfigLoader::new();
        match &self.config_file {
            Some(path) => {
                loader
                    .load_file(path)
                    .with_context(|| format!("failed to load config file {}", path.display()))?;
            }
            None => {
                loader.load_default_files();
            }
        }
        loader.load_env();

        let mut config = loader.extract().context("invalid sidecar configuration")?;

        if let Some(model) = &self.model {
            config.model.id = model.trim().to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = parse_log_level(level)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ner_sidecar::config::LogLevel;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_cli_and_lookup(CliArgs::default(), |_| None).unwrap();
        assert_eq!(config.port, 8099);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_request_size, 16 * 1024 * 1024);
        assert_eq!(config.bind_address(), "127.0.0.1:8099");
        assert!(config.model.is_none());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let lookup = lookup_from(&[
            ("NER_SIDECAR_PORT", "9100"),
            ("NER_SIDECAR_HOST", "0.0.0.0"),
            ("NER_SIDECAR_MODEL", "rules"),
            ("NER_SIDECAR_MAX_REQUEST_SIZE", "2048"),
        ]);
        let config = ServerConfig::from_cli_and_lookup(CliArgs::default(), lookup).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.model.as_deref(), Some("rules"));
        assert_eq!(config.max_request_size, 2048);
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = CliArgs {
            port: Some(7000),
            model: Some("dslim/bert-base-NER".to_string()),
            ..Default::default()
        };
        let lookup = lookup_from(&[("NER_SIDECAR_PORT", "9100"), ("NER_SIDECAR_MODEL", "rules")]);
        let config = ServerConfig::from_cli_and_lookup(cli, lookup).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.model.as_deref(), Some("dslim/bert-base-NER"));
    }

    #[test]
    fn test_invalid_env_port() {
        let lookup = lookup_from(&[("NER_SIDECAR_PORT", "eighty")]);
        let err = ServerConfig::from_cli_and_lookup(CliArgs::default(), lookup).unwrap_err();
        assert!(err.to_string().contains("NER_SIDECAR_PORT"));
    }

    #[test]
    fn test_sidecar_config_from_file_with_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sidecar.toml");
        std::fs::write(
            &path,
            r#"
[model]
id = "dslim/bert-base-NER"
max_length = 256

[logging]
level = "warn"
"#,
        )
        .unwrap();

        let config = ServerConfig {
            config_file: Some(path),
            model: Some("rules".to_string()),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };

        let sidecar = config.sidecar_config().unwrap();
        assert_eq!(sidecar.model.id, "rules");
        assert_eq!(sidecar.model.max_length, 256);
        assert_eq!(sidecar.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_sidecar_config_missing_file_fails() {
        let config = ServerConfig {
            config_file: Some(PathBuf::from("/no/such/sidecar.toml")),
            ..Default::default()
        };
        assert!(config.sidecar_config().is_err());
    }
}
