//! Configuration loader implementation

use crate::constants::{ENV_HEADERS_PREFIX, ENV_NESTING_SEPARATOR, ENV_PREFIX};
use crate::holder::EspaConfig;
use crate::schema::{insert_header, ClientConfig};
use espa_types::{ConfigError, EspaError};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use std::path::Path;

/// Configuration loader that handles YAML files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<EspaConfig, ConfigError> {
        let config = Self::read(config_path)?;
        EspaConfig::from_client_config(&config)
    }

    /// Load configuration from built-in defaults and environment variables
    pub fn from_env() -> Result<EspaConfig, ConfigError> {
        let config = Self::read_env()?;
        EspaConfig::from_client_config(&config)
    }

    /// Load configuration from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<EspaConfig, ConfigError> {
        let config = Self::read_str(yaml_content)?;
        EspaConfig::from_client_config(&config)
    }

    /// Read a configuration file with environment overrides, without validating it
    pub fn read<P: AsRef<Path>>(config_path: P) -> Result<ClientConfig, ConfigError> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: config_path.display().to_string(),
            });
        }

        let mut config = Figment::new()
            .merge(Yaml::file(config_path))
            // Override with environment variables (ESPA_HOST_URL, ESPA_LOGGING__LEVEL, ...)
            .merge(Self::env_provider())
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::apply_env_headers(&mut config);

        tracing::debug!(path = %config_path.display(), "Read configuration file");
        Ok(config)
    }

    /// Read built-in defaults with environment overrides, without validating them
    pub fn read_env() -> Result<ClientConfig, ConfigError> {
        let mut config = Figment::new()
            .merge(Self::env_provider())
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::apply_env_headers(&mut config);
        Ok(config)
    }

    /// Read configuration from a YAML string, without validating it
    pub fn read_str(yaml_content: &str) -> Result<ClientConfig, ConfigError> {
        Figment::new()
            .merge(Yaml::string(yaml_content))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Get default configuration
    pub fn default() -> ClientConfig {
        ClientConfig::default()
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<(), EspaError> {
        let yaml_content = serde_yaml::to_string(&Self::default())
            .map_err(|e| EspaError::Internal(format!("Failed to serialize default configuration: {}", e)))?;

        std::fs::write(path.as_ref(), yaml_content)?;

        Ok(())
    }

    // Headers are applied separately so that they extend the configured set
    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX)
            .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("headers"))
            .split(ENV_NESTING_SEPARATOR)
    }

    fn apply_env_headers(config: &mut ClientConfig) {
        for (key, value) in Env::prefixed(ENV_HEADERS_PREFIX).iter() {
            let name = header_name_from_env(key.as_str());
            if name.is_empty() {
                continue;
            }
            tracing::debug!(header = %name, "Header set from environment");
            insert_header(&mut config.headers, name, value);
        }
    }
}

/// Header name for an environment key: `CONTENT_TYPE` becomes `Content-Type`.
/// Environment variable names cannot carry `-`, so `_` stands in for it.
pub fn header_name_from_env(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
