//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Reserva
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ReservaError {
    /// Malformed or missing input fields. Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Location/time overlap with an existing reservation.
    #[error("Reservation conflict: {0}")]
    Conflict(String),

    /// The user has no stored OAuth credentials; re-authentication required.
    #[error("No stored credentials: {0}")]
    NoCredentials(String),

    /// Refresh-token exchange failed; stored tokens are left untouched.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Calendar provider failure. Logged, never surfaced as a failure of the
    /// enclosing reservation operation.
    #[error("Calendar sync error: {0}")]
    Sync(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Reserva operations
pub type Result<T> = std::result::Result<T, ReservaError>;
