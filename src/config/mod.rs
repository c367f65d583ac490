mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    load_with(env::var("CONFIG_PATH").ok().as_deref(), DEFAULT_CONFIG_PATH).await
}

/// Loads `explicit_path` if given. Otherwise loads `default_path`, falling back
/// to the built-in defaults when that file does not exist.
pub async fn load_with(explicit_path: Option<&str>, default_path: &str) -> Result<Config> {
    match explicit_path {
        Some(path) => load_from(path).await,
        None if !Path::new(default_path).exists() => {
            debug!("No {} found, using default configuration", default_path);
            Ok(Config::default())
        }
        None => load_from(default_path).await,
    }
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| Error::config(format!("Failed to read {}: {}", config_path, e)))?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Validates that a log level string is valid
pub fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            Error::config(format!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            ))
        })?;
    Ok(())
}

/// Builds the log filter. A `rust_log` directive string takes precedence over
/// the configured level, which must be a plain level name.
pub fn log_filter(rust_log: Option<&str>, configured_level: &str) -> Result<(EnvFilter, String)> {
    let directives = match rust_log {
        Some(directives) => directives.to_string(),
        None => {
            validate_log_level(configured_level)?;
            configured_level.to_string()
        }
    };

    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {}", directives, e)))?;

    Ok((filter, directives))
}

/// Installs the JSON tracing subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &Config) -> Result<String> {
    let rust_log = env::var("RUST_LOG").ok();
    let (filter, log_level) = log_filter(rust_log.as_deref(), &config.server.logs.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    Ok(log_level)
}
