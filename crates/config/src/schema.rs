//! Configuration schema definitions

use crate::constants::{API_HOST_URL, HEADERS};
use espa_types::utils::header_name_eq;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Header name to header value, ordered by name
pub type DefaultHeaders = BTreeMap<String, String>;

/// Client configuration as read from YAML and the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the ESPA API
    #[serde(default = "default_host_url")]
    pub host_url: String,
    /// Headers attached to every request. A `headers` section replaces the
    /// built-in set rather than extending it.
    #[serde(default = "default_header_map")]
    pub headers: DefaultHeaders,
    /// Absolute template directory, overriding the install-relative one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host_url() -> String {
    API_HOST_URL.to_string()
}

pub(crate) fn default_header_map() -> DefaultHeaders {
    HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Insert a header, replacing any existing header of the same name
/// compared case-insensitively
pub fn insert_header(headers: &mut DefaultHeaders, name: String, value: String) {
    headers.retain(|existing, _| !header_name_eq(existing, &name));
    headers.insert(name, value);
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            headers: default_header_map(),
            template_dir: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
