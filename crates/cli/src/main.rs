//! ESPA client configuration tool - main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use espa_config::LoggingConfig;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "espa-config")]
#[command(about = "Inspect and validate ESPA API client configuration", version)]
pub struct Cli {
    /// YAML configuration file (falls back to CONFIG_PATH, then built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective configuration
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Validate the configuration and report errors and warnings
    Validate,
    /// Write an example configuration file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved template directory
    TemplateDir,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| env::var("CONFIG_PATH").ok().map(PathBuf::from));

    let logging = resolve_logging(
        env::var("RUST_LOG").ok(),
        env::var("LOG_FORMAT").ok(),
        &commands::logging_config(config_path.as_deref()),
    );
    init_logging(&logging)?;

    if let Err(e) = dotenv_result {
        if !e.not_found() {
            warn!("Could not load .env file: {}", e);
        }
    }

    info!("espa-config v{}", env!("CARGO_PKG_VERSION"));

    commands::run(&cli.command, config_path.as_deref()).context("Command failed")
}

/// RUST_LOG and LOG_FORMAT take precedence over the configuration's logging section
fn resolve_logging(
    env_level: Option<String>,
    env_format: Option<String>,
    configured: &LoggingConfig,
) -> LoggingConfig {
    LoggingConfig {
        level: env_level.unwrap_or_else(|| configured.level.clone()),
        format: env_format.unwrap_or_else(|| configured.format.clone()),
    }
}

/// Initialize logging from the resolved settings
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(&logging.level)
        .context("Invalid log level")?;

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout is reserved for command output
    match logging.format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    Ok(())
}
