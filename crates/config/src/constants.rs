//! Built-in values for the ESPA ordering API.

/// Base URL of the ESPA ordering API
pub const API_HOST_URL: &str = "https://espa.cr.usgs.gov";

/// Name of the template directory bundled next to the installed program
pub const TEMPLATES_DIR_NAME: &str = "templates";

/// Content-Type header name
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// JSON media type
pub const MEDIA_TYPE_JSON: &str = "application/json";

/// Headers attached to every outgoing request unless overridden.
pub const HEADERS: &[(&str, &str)] = &[(HEADER_CONTENT_TYPE, MEDIA_TYPE_JSON)];

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "ESPA_";

/// Separator for nested keys in environment overrides (`ESPA_LOGGING__LEVEL`)
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Prefix for header overrides from the environment. `ESPA_HEADERS__X_API_KEY`
/// sets `X-Api-Key` on top of the configured headers.
pub const ENV_HEADERS_PREFIX: &str = "ESPA_HEADERS__";
