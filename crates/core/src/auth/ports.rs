//! Port interface for the OAuth token endpoint

use async_trait::async_trait;
use reserva_domain::{Result, TokenSet};

/// Basic profile claims extracted from an OAuth sign-in.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    /// Stable provider account id (`sub` claim).
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Trait for the Google OAuth token endpoint
#[async_trait]
pub trait GoogleTokenClient: Send + Sync {
    /// Exchange a refresh token for a fresh access token.
    ///
    /// Google normally omits the refresh token from refresh grants; when it
    /// does rotate one, the returned set carries it.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenSet>;

    /// Exchange an authorization code for the initial token set.
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenSet>;

    /// Extract the profile claims carried by a token set's ID token.
    fn profile_from(&self, tokens: &TokenSet) -> Result<OAuthProfile>;
}
