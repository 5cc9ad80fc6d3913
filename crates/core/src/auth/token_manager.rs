//! Token manager with refresh-on-expiry
//!
//! Manages the OAuth token lifecycle for calendar sync:
//! - Reads the token pair stored on the user row
//! - Refreshes through the OAuth provider when the access token is expired
//!   (or inside the refresh threshold)
//! - Persists refreshed tokens back onto the user
//!
//! Two concurrent refreshes for the same user are resolved last-write-wins:
//! Google keeps the prior refresh token valid after rotation, so whichever
//! write lands second still leaves a usable pair behind. This race is
//! accepted rather than locked around.

use std::sync::Arc;

use reserva_domain::constants::TOKEN_REFRESH_THRESHOLD_SECONDS;
use reserva_domain::{ReservaError, Result, TokenSet, User};
use tracing::{debug, info, warn};

use super::ports::GoogleTokenClient;
use crate::reservations::ports::UserRepository;

/// Token manager backed by the user repository and an OAuth client
pub struct TokenManager {
    oauth: Arc<dyn GoogleTokenClient>,
    users: Arc<dyn UserRepository>,
    refresh_threshold_seconds: i64,
}

impl TokenManager {
    /// Create a new token manager with the default refresh threshold.
    pub fn new(oauth: Arc<dyn GoogleTokenClient>, users: Arc<dyn UserRepository>) -> Self {
        Self { oauth, users, refresh_threshold_seconds: TOKEN_REFRESH_THRESHOLD_SECONDS }
    }

    /// Override the refresh threshold (mainly for tests).
    pub fn with_refresh_threshold(mut self, seconds: i64) -> Self {
        self.refresh_threshold_seconds = seconds;
        self
    }

    /// Return a usable access token for `user`, refreshing if needed.
    ///
    /// # Errors
    /// - `NoCredentials` when the user has no stored token pair; the caller
    ///   must surface a re-authentication prompt.
    /// - `RefreshFailed` when the provider rejects the refresh token. The
    ///   stored tokens are left in place so the caller can retry after
    ///   re-authentication is prompted.
    pub async fn get_valid_access_token(&self, user: &User) -> Result<String> {
        let creds = user.credentials().ok_or_else(|| {
            ReservaError::NoCredentials(format!("user {} has no stored tokens", user.email))
        })?;

        if !creds.is_expired(self.refresh_threshold_seconds) {
            debug!(user_email = %user.email, "stored access token still valid");
            return Ok(creds.access_token);
        }

        info!(user_email = %user.email, "access token expired, refreshing");

        let refreshed = match self.oauth.refresh_access_token(&creds.refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(user_email = %user.email, error = %e, "token refresh rejected");
                return Err(ReservaError::RefreshFailed(e.to_string()));
            }
        };

        // Persist before returning so the next request sees the new pair.
        // Failure to persist is a refresh failure: the caller would otherwise
        // refresh again on every call.
        self.users
            .update_tokens(user.id, &refreshed)
            .await
            .map_err(|e| ReservaError::RefreshFailed(format!("persisting tokens: {e}")))?;

        Ok(refreshed.access_token)
    }
}
