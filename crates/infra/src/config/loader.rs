//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `RESERVA_DB_PATH`: Database file path
//! - `RESERVA_DB_POOL_SIZE`: Connection pool size (default 4)
//! - `RESERVA_GOOGLE_CLIENT_ID`: OAuth client id
//! - `RESERVA_GOOGLE_CLIENT_SECRET`: OAuth client secret
//! - `RESERVA_GOOGLE_CALENDAR_ID`: Target calendar (default "primary")
//! - `RESERVA_TIMEZONE`: IANA timezone for rendered events
//! - `RESERVA_ALLOWED_DOMAIN`: Email domain allowed to sign in
//! - `RESERVA_BIND_ADDR`: HTTP listen address (default 127.0.0.1:8080)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` / `./config.json`
//! 2. `./reserva.toml` / `./reserva.json`
//! 3. The same names in the parent directory

use std::path::PathBuf;

use reserva_domain::constants::DEFAULT_CALENDAR_ID;
use reserva_domain::{Config, DatabaseConfig, GoogleConfig, ReservaError, Result, ServerConfig};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ReservaError::Config` if neither source yields a complete
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ReservaError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("RESERVA_DB_PATH")?;
    let pool_size = match std::env::var("RESERVA_DB_POOL_SIZE") {
        Ok(value) => value
            .parse::<u32>()
            .map_err(|e| ReservaError::Config(format!("invalid pool size: {e}")))?,
        Err(_) => 4,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        google: GoogleConfig {
            client_id: env_var("RESERVA_GOOGLE_CLIENT_ID")?,
            client_secret: env_var("RESERVA_GOOGLE_CLIENT_SECRET")?,
            calendar_id: std::env::var("RESERVA_GOOGLE_CALENDAR_ID")
                .unwrap_or_else(|_| DEFAULT_CALENDAR_ID.to_string()),
            timezone: env_var("RESERVA_TIMEZONE")?,
            allowed_domain: env_var("RESERVA_ALLOWED_DOMAIN")?,
        },
        server: ServerConfig {
            bind_addr: std::env::var("RESERVA_BIND_ADDR")
                .unwrap_or_else(|_| ServerConfig::default().bind_addr),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected by
/// file extension (`.toml` or `.json`).
///
/// # Errors
/// Returns `ReservaError::Config` if no file is found or it fails to parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReservaError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReservaError::Config("no config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReservaError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &std::path::Path) -> Result<Config> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(contents)
            .map_err(|e| ReservaError::Config(format!("invalid TOML config: {e}"))),
        Some("json") => serde_json::from_str(contents)
            .map_err(|e| ReservaError::Config(format!("invalid JSON config: {e}"))),
        other => Err(ReservaError::Config(format!(
            "unsupported config format: {}",
            other.unwrap_or("none")
        ))),
    }
}

fn probe_config_paths() -> Option<PathBuf> {
    let names = ["config.toml", "config.json", "reserva.toml", "reserva.json"];
    let bases = [PathBuf::from("."), PathBuf::from("..")];

    for base in &bases {
        for name in &names {
            let candidate = base.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| ReservaError::Config(format!("missing environment variable: {name}")))
}
