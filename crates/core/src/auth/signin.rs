//! Google sign-in and user provisioning
//!
//! Completes the OAuth authorization-code flow: exchanges the code, checks
//! the email against the allowed workspace domain, and upserts the user row
//! together with the token pair used later for calendar sync.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use reserva_domain::{ReservaError, Result, Role, User};
use tracing::{info, instrument};
use uuid::Uuid;

use super::ports::GoogleTokenClient;
use crate::reservations::ports::UserRepository;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern compiles")
});

/// Sign-in service for the Google authorization-code flow
pub struct SignInService {
    oauth: Arc<dyn GoogleTokenClient>,
    users: Arc<dyn UserRepository>,
    allowed_domain: String,
}

impl SignInService {
    /// Create a sign-in service restricted to `allowed_domain`.
    pub fn new(
        oauth: Arc<dyn GoogleTokenClient>,
        users: Arc<dyn UserRepository>,
        allowed_domain: String,
    ) -> Self {
        Self { oauth, users, allowed_domain }
    }

    /// Complete a sign-in from an authorization code.
    ///
    /// Provisions the user on first sign-in and refreshes the stored profile
    /// on subsequent ones. Tokens are stored only when the exchange returned
    /// a refresh token (Google omits it when consent was already granted; the
    /// previously stored pair stays valid in that case).
    #[instrument(skip_all)]
    pub async fn sign_in_with_code(&self, code: &str, redirect_uri: &str) -> Result<User> {
        let tokens = self.oauth.exchange_code(code, redirect_uri).await?;
        let profile = self.oauth.profile_from(&tokens)?;

        if !EMAIL_RE.is_match(&profile.email) {
            return Err(ReservaError::Validation(format!(
                "provider returned malformed email: {}",
                profile.email
            )));
        }

        let domain_suffix = format!("@{}", self.allowed_domain);
        if !profile.email.ends_with(&domain_suffix) {
            return Err(ReservaError::Validation(format!(
                "{} is outside the allowed domain {}",
                profile.email, self.allowed_domain
            )));
        }

        let now = Utc::now();
        let user = match self.users.find_by_email(&profile.email).await? {
            Some(mut existing) => {
                existing.google_sub = Some(profile.sub);
                existing.name = profile.name;
                existing.avatar_url = profile.avatar_url;
                existing.updated_at = now;
                existing
            }
            None => User {
                id: Uuid::new_v4(),
                email: profile.email.clone(),
                name: profile.name,
                avatar_url: profile.avatar_url,
                role: Role::User,
                google_sub: Some(profile.sub),
                access_token: None,
                refresh_token: None,
                token_expiry: None,
                created_at: now,
                updated_at: now,
            },
        };

        self.users.upsert(&user).await?;

        if tokens.refresh_token.is_some() {
            self.users.update_tokens(user.id, &tokens).await?;
        }

        info!(user_email = %user.email, "sign-in completed");

        // Re-read so the returned record reflects the stored token state.
        self.users
            .find_by_email(&user.email)
            .await?
            .ok_or_else(|| ReservaError::Internal("user vanished during sign-in".into()))
    }
}
