//! OAuth token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth 2.0 token pair returned by the provider's token endpoint.
///
/// `refresh_token` is optional: Google only issues one on the initial
/// consent exchange, not on refresh grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// ID token (JWT) carrying the OpenID Connect claims.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Access token lifetime in seconds, as reported by the provider.
    pub expires_in: i64,
    /// Absolute expiry, computed from `expires_in` at receipt time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenSet {
    /// Build a token set, stamping `expires_at` from `expires_in`.
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        id_token: Option<String>,
        expires_in: i64,
    ) -> Self {
        let expires_at = (expires_in > 0).then(|| Utc::now() + chrono::Duration::seconds(expires_in));
        Self { access_token, refresh_token, id_token, expires_in, expires_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_stamped_from_lifetime() {
        let tokens = TokenSet::new("tok".into(), None, None, 3600);
        let expires_at = tokens.expires_at.unwrap();
        let delta = (expires_at - Utc::now()).num_seconds();
        assert!((3595..=3600).contains(&delta));
    }

    #[test]
    fn zero_lifetime_leaves_expiry_unset() {
        let tokens = TokenSet::new("tok".into(), Some("ref".into()), None, 0);
        assert!(tokens.expires_at.is_none());
    }
}
