//! Application configuration structures
//!
//! Populated by the infra config loader from environment variables or a
//! TOML file.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub google: GoogleConfig,
    pub server: ServerConfig,
}

/// SQLite database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Google OAuth + Calendar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Calendar that mirrors local reservations.
    pub calendar_id: String,
    /// IANA timezone name events are rendered in (e.g. "Europe/Madrid").
    pub timezone: String,
    /// Only emails under this domain may own reservations.
    pub allowed_domain: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:8080".to_string() }
    }
}
