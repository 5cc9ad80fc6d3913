//! User types
//!
//! Users are provisioned from Google OAuth sign-in (domain restricted) and
//! carry the OAuth token pair used for calendar sync on their behalf.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::errors::ReservaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => {
                Err(crate::errors::ReservaError::Validation(format!("unknown role: {other}")))
            }
        }
    }
}

/// A user account stored in the local database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    /// Google account id (`sub` claim), set after first sign-in.
    pub google_sub: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The OAuth token pair a user has on file.
///
/// Only constructed when both tokens are present, which keeps the
/// both-or-neither invariant at the type level.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub access_token: String,
    pub refresh_token: String,
    pub token_expiry: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Stored OAuth credentials, or `None` when the user never completed the
    /// OAuth flow (or it was revoked).
    pub fn credentials(&self) -> Option<StoredCredentials> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(StoredCredentials {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
                token_expiry: self.token_expiry,
            }),
            _ => None,
        }
    }
}

impl StoredCredentials {
    /// Whether the access token is expired or expires within the threshold.
    ///
    /// A missing expiry is treated as expired so the first use after an
    /// incomplete token write forces a refresh rather than a failed API call.
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.token_expiry {
            Some(expiry) => Utc::now() + chrono::Duration::seconds(threshold_seconds) >= expiry,
            None => true,
        }
    }
}
