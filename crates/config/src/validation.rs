//! Configuration validation utilities

use crate::constants::{HEADER_CONTENT_TYPE, TEMPLATES_DIR_NAME};
use crate::schema::ClientConfig;
use espa_types::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Url;
use std::collections::HashSet;
use std::ffi::OsStr;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &ClientConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_host_url(config, &mut report);
        Self::validate_headers(config, &mut report);
        Self::validate_template_dir(config, &mut report);
        Self::validate_logging(config, &mut report);

        report
    }

    fn validate_host_url(config: &ClientConfig, report: &mut ValidationReport) {
        let host_url = config.host_url.trim();
        if host_url.is_empty() {
            report.add_error("host_url", "Host URL cannot be empty");
            return;
        }

        let url = match Url::parse(host_url) {
            Ok(url) => url,
            Err(e) => {
                report.add_error("host_url", &format!("Invalid host URL {}: {}", host_url, e));
                return;
            }
        };

        match url.scheme() {
            "https" => {}
            "http" => report.add_warning("host_url", "Host URL should use HTTPS"),
            other => {
                report.add_error("host_url", &format!("Unsupported URL scheme: {}", other));
                return;
            }
        }

        if url.host_str().is_none() {
            report.add_error("host_url", &format!("Host URL has no host: {}", host_url));
        }

        if url.query().is_some() || url.fragment().is_some() {
            report.add_error("host_url", "Host URL cannot carry a query string or fragment");
        }

        if url.path() != "/" {
            report.add_warning(
                "host_url",
                &format!("Host URL has a path ({}), endpoints will be joined beneath it", url.path()),
            );
        }

        if host_url.ends_with('/') {
            report.add_warning("host_url", "Trailing slash on host URL will be stripped");
        }
    }

    fn validate_headers(config: &ClientConfig, report: &mut ValidationReport) {
        if config.headers.is_empty() {
            report.add_error("headers", "At least one default header must be configured");
            return;
        }

        let mut seen = HashSet::new();
        for (name, value) in &config.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                report.add_error("headers", &format!("Invalid header name: {:?}", name));
                continue;
            }

            if !seen.insert(name.to_ascii_lowercase()) {
                report.add_error("headers", &format!("Duplicate header name: {}", name));
            }

            if HeaderValue::from_str(value).is_err() {
                report.add_error(
                    &format!("headers.{}", name),
                    &format!("Invalid header value: {:?}", value),
                );
            }
        }

        if !seen.contains(&HEADER_CONTENT_TYPE.to_ascii_lowercase()) {
            report.add_warning("headers", "No Content-Type header configured");
        }
    }

    fn validate_template_dir(config: &ClientConfig, report: &mut ValidationReport) {
        let Some(ref dir) = config.template_dir else {
            return;
        };

        if !dir.is_absolute() {
            report.add_error(
                "template_dir",
                &format!("Template directory must be absolute: {}", dir.display()),
            );
        } else if dir.file_name() != Some(OsStr::new(TEMPLATES_DIR_NAME)) {
            report.add_error(
                "template_dir",
                &format!("Template directory must be named {}: {}", TEMPLATES_DIR_NAME, dir.display()),
            );
        } else if !dir.exists() {
            report.add_warning(
                "template_dir",
                &format!("Template directory does not exist: {}", dir.display()),
            );
        }
    }

    fn validate_logging(config: &ClientConfig, report: &mut ValidationReport) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            report.add_error("logging.level", &format!("Invalid log level: {}. Valid levels: {:?}", config.logging.level, valid_levels));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            report.add_error("logging.format", &format!("Invalid log format: {}. Valid formats: {:?}", config.logging.format, valid_formats));
        }

        if config.logging.level == "trace" || config.logging.level == "debug" {
            report.add_warning("logging.level", "Debug/trace logging may impact performance in production");
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }

    /// Emit every warning through `tracing`
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }
    }

    /// Turn the first error, if any, into a [`ConfigError::ValidationError`]
    pub fn into_result(self) -> Result<(), ConfigError> {
        match self.errors.into_iter().next() {
            Some(issue) => Err(ConfigError::ValidationError {
                field: issue.field,
                message: issue.message,
            }),
            None => Ok(()),
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
