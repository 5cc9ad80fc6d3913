//! Google OAuth token endpoint client
//!
//! Implements the `GoogleTokenClient` port: refresh-token grants,
//! authorization-code exchange, and profile extraction from the ID token.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::Client;
use reserva_core::{GoogleTokenClient, OAuthProfile};
use reserva_domain::constants::HTTP_REQUEST_TIMEOUT_SECONDS;
use reserva_domain::{GoogleConfig, ReservaError, Result, TokenSet};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::InfraError;

const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Google OAuth token endpoint client
pub struct GoogleOAuthClient {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl GoogleOAuthClient {
    /// Create a client against the production token endpoint.
    pub fn new(config: &GoogleConfig) -> Result<Self> {
        Self::with_token_url(config, GOOGLE_TOKEN_ENDPOINT.to_string())
    }

    /// Create a client against an alternative token endpoint (tests).
    pub fn with_token_url(config: &GoogleConfig, token_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(InfraError::from)?;

        Ok(Self {
            http,
            token_url,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    async fn post_token_form(&self, form: &[(&str, &str)]) -> Result<GoogleTokenResponse> {
        let response = self
            .http
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(InfraError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            warn!(%status, "token endpoint rejected request");
            return Err(ReservaError::RefreshFailed(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| InfraError::from(e).into())
    }
}

#[async_trait]
impl GoogleTokenClient for GoogleOAuthClient {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenSet> {
        let response = self
            .post_token_form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;

        debug!("access token refreshed");
        Ok(response.into_token_set())
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenSet> {
        let response = self
            .post_token_form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .await
            .map_err(|e| match e {
                // a failed code exchange means the user must start over
                ReservaError::RefreshFailed(msg) => ReservaError::NoCredentials(msg),
                other => other,
            })?;

        Ok(response.into_token_set())
    }

    fn profile_from(&self, tokens: &TokenSet) -> Result<OAuthProfile> {
        let id_token = tokens
            .id_token
            .as_deref()
            .ok_or_else(|| ReservaError::NoCredentials("provider returned no ID token".into()))?;

        let claims = decode_id_token_claims(id_token)?;

        let email = claims
            .email
            .ok_or_else(|| ReservaError::NoCredentials("email claim missing from ID token".into()))?;
        let sub = claims
            .sub
            .ok_or_else(|| ReservaError::NoCredentials("sub claim missing from ID token".into()))?;

        Ok(OAuthProfile { sub, email, name: claims.name, avatar_url: claims.picture })
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    id_token: Option<String>,
    expires_in: i64,
}

impl GoogleTokenResponse {
    fn into_token_set(self) -> TokenSet {
        TokenSet::new(self.access_token, self.refresh_token, self.id_token, self.expires_in)
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Decode the claims segment of an ID token (JWT).
///
/// The token arrived over TLS from the token endpoint itself, so the
/// signature is not re-verified here.
fn decode_id_token_claims(id_token: &str) -> Result<IdTokenClaims> {
    let mut parts = id_token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(ReservaError::NoCredentials("malformed ID token".into())),
    };

    let payload_bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|e| {
        ReservaError::NoCredentials(format!("failed to decode ID token payload: {e}"))
    })?;

    serde_json::from_slice(&payload_bytes)
        .map_err(|e| ReservaError::NoCredentials(format!("failed to parse ID token payload: {e}")))
}
