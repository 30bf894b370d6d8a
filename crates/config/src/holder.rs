//! Validated, read-only client configuration
//!
//! [`EspaConfig`] is built once (from defaults, or from a loaded
//! [`ClientConfig`]) and never mutated afterwards. A process-wide instance can
//! be installed at the entrypoint with [`EspaConfig::install_global`], or
//! constructed from defaults on first use by [`EspaConfig::global`].

use crate::constants::API_HOST_URL;
use crate::schema::{default_header_map, insert_header, ClientConfig, DefaultHeaders, LoggingConfig};
use crate::template::resolve_template_dir;
use crate::validation::ConfigValidator;
use espa_types::utils::strip_trailing_slash;
use espa_types::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static GLOBAL: OnceLock<EspaConfig> = OnceLock::new();

/// Base URL of the ESPA API
pub fn api_host_url() -> &'static str {
    API_HOST_URL
}

/// A fresh copy of the built-in default headers
pub fn default_headers() -> DefaultHeaders {
    default_header_map()
}

/// Client configuration holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EspaConfig {
    host_url: String,
    headers: DefaultHeaders,
    template_dir: PathBuf,
    logging: LoggingConfig,
}

impl EspaConfig {
    /// Configuration made of the built-in values
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Ok(Self {
            host_url: API_HOST_URL.to_string(),
            headers: default_header_map(),
            template_dir: resolve_template_dir()?.to_path_buf(),
            logging: LoggingConfig::default(),
        })
    }

    /// Validate a loaded configuration and freeze it
    pub fn from_client_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let report = ConfigValidator::validate(config);
        report.log_warnings();
        report.into_result()?;

        let template_dir = match config.template_dir {
            Some(ref dir) => dir.clone(),
            None => resolve_template_dir()?.to_path_buf(),
        };

        // Store the URL as parsed, not as written
        let host_url = Url::parse(config.host_url.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "host_url".to_string(),
            value: format!("{} ({})", config.host_url, e),
        })?;

        Ok(Self {
            host_url: strip_trailing_slash(host_url.as_str()).to_string(),
            headers: config.headers.clone(),
            template_dir,
            logging: config.logging.clone(),
        })
    }

    /// Process-wide configuration, built from defaults on first use
    pub fn global() -> Result<&'static EspaConfig, ConfigError> {
        if let Some(config) = GLOBAL.get() {
            return Ok(config);
        }

        let config = Self::from_defaults()?;
        Ok(GLOBAL.get_or_init(|| config))
    }

    /// Install the process-wide configuration. Fails if one is already set,
    /// including one created implicitly by [`EspaConfig::global`].
    pub fn install_global(config: EspaConfig) -> Result<(), ConfigError> {
        GLOBAL.set(config).map_err(|_| ConfigError::AlreadyInitialized)?;
        tracing::debug!("Installed process-wide ESPA configuration");
        Ok(())
    }

    /// Base URL of the API, without a trailing slash
    pub fn api_host_url(&self) -> &str {
        &self.host_url
    }

    /// A copy of the default headers. Changes to the copy are not shared.
    pub fn default_headers(&self) -> DefaultHeaders {
        self.headers.clone()
    }

    /// Absolute template directory
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Logging settings carried by the configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Default headers extended with `extra`. An extra header replaces any
    /// default of the same name, compared case-insensitively.
    pub fn merged_headers<I, K, V>(&self, extra: I) -> DefaultHeaders
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut headers = self.default_headers();
        for (name, value) in extra {
            insert_header(&mut headers, name.into(), value.into());
        }
        headers
    }

    /// Default headers as a typed header map
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                ConfigError::InvalidValue {
                    field: "headers".to_string(),
                    value: name.clone(),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidValue {
                field: format!("headers.{}", name),
                value: value.clone(),
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// Absolute URL for an API path, joined beneath the host URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let joined = format!("{}/{}", self.host_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| ConfigError::InvalidValue {
            field: "endpoint".to_string(),
            value: format!("{} ({})", joined, e),
        })
    }

    /// Configuration as a serializable schema value
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            host_url: self.host_url.clone(),
            headers: self.headers.clone(),
            template_dir: Some(self.template_dir.clone()),
            logging: self.logging.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TEMPLATES_DIR_NAME;
    use reqwest::header::CONTENT_TYPE;

    #[test]
    fn test_free_accessors() {
        assert_eq!(api_host_url(), "https://espa.cr.usgs.gov");

        let headers = default_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_default_headers_are_independent_copies() {
        let mut first = default_headers();
        first.insert("X-Extra".to_string(), "1".to_string());
        first.insert("Content-Type".to_string(), "text/plain".to_string());

        let second = default_headers();
        assert_ne!(first, second);
        assert_eq!(second["Content-Type"], "application/json");
        assert!(!second.contains_key("X-Extra"));

        let config = EspaConfig::from_defaults().unwrap();
        let mut copy = config.default_headers();
        copy.clear();
        assert_eq!(config.default_headers().len(), 1);
    }

    #[test]
    fn test_from_defaults() {
        let config = EspaConfig::from_defaults().unwrap();
        assert_eq!(config.api_host_url(), API_HOST_URL);
        assert_eq!(config.default_headers(), default_headers());
        assert!(config.template_dir().is_absolute());
        assert!(config.template_dir().ends_with(TEMPLATES_DIR_NAME));
        assert_eq!(config, EspaConfig::from_defaults().unwrap());
    }

    #[test]
    fn test_from_client_config_strips_trailing_slash() {
        let client = ClientConfig {
            host_url: "https://espa.cr.usgs.gov/".to_string(),
            ..ClientConfig::default()
        };
        let config = EspaConfig::from_client_config(&client).unwrap();
        assert_eq!(config.api_host_url(), "https://espa.cr.usgs.gov");
    }

    #[test]
    fn test_from_client_config_stores_parsed_url() {
        let client = ClientConfig {
            host_url: "HTTPS://ESPA.cr.\tusgs.gov\n/".to_string(),
            ..ClientConfig::default()
        };
        let config = EspaConfig::from_client_config(&client).unwrap();
        assert_eq!(config.api_host_url(), "https://espa.cr.usgs.gov");
        assert_eq!(
            config.endpoint("api/v1/user").unwrap().as_str(),
            "https://espa.cr.usgs.gov/api/v1/user"
        );
    }

    #[test]
    fn test_from_client_config_rejects_invalid() {
        let client = ClientConfig {
            host_url: "espa.cr.usgs.gov".to_string(),
            ..ClientConfig::default()
        };
        let err = EspaConfig::from_client_config(&client).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "host_url"));
    }

    #[test]
    fn test_template_dir_override() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("templates");
        std::fs::create_dir(&dir).unwrap();
        let client = ClientConfig {
            template_dir: Some(dir.clone()),
            ..ClientConfig::default()
        };
        let config = EspaConfig::from_client_config(&client).unwrap();
        assert_eq!(config.template_dir(), dir.as_path());
    }

    #[test]
    fn test_template_dir_override_outside_templates_is_rejected() {
        let client = ClientConfig {
            template_dir: Some(PathBuf::from("/etc")),
            ..ClientConfig::default()
        };
        let err = EspaConfig::from_client_config(&client).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "template_dir"));
    }

    #[test]
    fn test_merged_headers_replace_case_insensitively() {
        let config = EspaConfig::from_defaults().unwrap();
        let merged = config.merged_headers([
            ("content-type", "application/geo+json"),
            ("Authorization", "Basic abc"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged["content-type"], "application/geo+json");
        assert_eq!(merged["Authorization"], "Basic abc");
        assert!(!merged.contains_key("Content-Type"));

        // the holder itself is untouched
        assert_eq!(config.default_headers(), default_headers());
    }

    #[test]
    fn test_header_map() {
        let config = EspaConfig::from_defaults().unwrap();
        let map = config.header_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(CONTENT_TYPE).unwrap().to_str().unwrap(), "application/json");
    }

    #[test]
    fn test_endpoint_join() {
        let config = EspaConfig::from_defaults().unwrap();
        let with_slash = config.endpoint("/api/v1/user").unwrap();
        let without_slash = config.endpoint("api/v1/user").unwrap();
        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash.as_str(), "https://espa.cr.usgs.gov/api/v1/user");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ClientConfig {
            host_url: "https://example.test/espa".to_string(),
            ..ClientConfig::default()
        };
        let config = EspaConfig::from_client_config(&client).unwrap();
        assert_eq!(
            config.endpoint("api/v1/order").unwrap().as_str(),
            "https://example.test/espa/api/v1/order"
        );
    }

    #[test]
    fn test_global_is_stable() {
        let first = EspaConfig::global().unwrap();
        let second = EspaConfig::global().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.api_host_url(), API_HOST_URL);
    }

    #[test]
    fn test_config_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EspaConfig>();

        let config = EspaConfig::global().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || config.default_headers()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), default_headers());
        }
    }
}
