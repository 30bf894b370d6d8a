//! Subcommand implementations

use crate::{Commands, OutputFormat};
use anyhow::{bail, Context, Result};
use espa_config::{
    ClientConfig, ConfigLoader, ConfigValidator, EspaConfig, LoggingConfig, ValidationReport,
};
use espa_types::ConfigError;
use std::path::Path;
use tracing::{info, warn};

pub fn run(command: &Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Show { format } => {
            let config = load(config_path)?;
            println!("{}", render(&config.to_client_config(), *format)?);
        }
        Commands::Validate => {
            let client = read(config_path)?;
            let report = ConfigValidator::validate(&client);
            print!("{}", format_report(&report));
            if report.has_errors() {
                bail!(report.summary());
            }
        }
        Commands::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", path.display());
            }
            ConfigLoader::create_example(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote example configuration");
            println!("{}", path.display());
        }
        Commands::TemplateDir => {
            let config = load(config_path)?;
            let dir = config.template_dir();
            if !dir.is_dir() {
                warn!(template_dir = %dir.display(), "Template directory does not exist");
            }
            println!("{}", dir.display());
        }
    }

    Ok(())
}

fn read(config_path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    match config_path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            ConfigLoader::read(path)
        }
        None => ConfigLoader::read_env(),
    }
}

/// Logging section of the configuration, or the defaults when it cannot be read
pub fn logging_config(config_path: Option<&Path>) -> LoggingConfig {
    read(config_path)
        .map(|config| config.logging)
        .unwrap_or_default()
}

fn load(config_path: Option<&Path>) -> Result<EspaConfig> {
    let client = read(config_path).context("Failed to load configuration")?;
    EspaConfig::from_client_config(&client).context("Invalid configuration")
}

/// Serialize a configuration in the requested format
pub fn render(config: &ClientConfig, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(config).context("Failed to render YAML")?,
        OutputFormat::Json => serde_json::to_string_pretty(config).context("Failed to render JSON")?,
    };
    Ok(rendered)
}

/// One line per issue, followed by the summary
pub fn format_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    for issue in &report.errors {
        out.push_str(&format!("error: {}: {}\n", issue.field, issue.message));
    }
    for issue in &report.warnings {
        out.push_str(&format!("warning: {}: {}\n", issue.field, issue.message));
    }
    out.push_str(&report.summary());
    out.push('\n');
    out
}
