//! Configuration management for the ESPA API client
//!
//! This crate holds the API host URL, the default request headers and the
//! location of the bundled template directory. Values can be overridden from
//! YAML files and environment variables, are validated once, and are then
//! exposed read-only through [`EspaConfig`].

pub mod constants;
pub mod holder;
pub mod loader;
pub mod schema;
pub mod template;
pub mod validation;

pub use constants::*;
pub use holder::{api_host_url, default_headers, EspaConfig};
pub use loader::ConfigLoader;
pub use schema::*;
pub use template::{resolve_template_dir, template_dir_for};
pub use validation::*;
