//! HTTP route handlers

pub mod auth;
pub mod events;
pub mod health;
pub mod reservations;

use axum::http::HeaderMap;
use reserva_domain::{ReservaError, User};

use crate::context::AppContext;
use crate::error::ApiResult;

/// Header carrying the authenticated user's email.
///
/// Session handling lives in front of this service (reverse proxy /
/// gateway); by the time a request lands here the identity is already
/// verified and forwarded in this header.
pub const USER_HEADER: &str = "x-user-email";

/// Resolve the calling user from the identity header.
pub async fn current_user(context: &AppContext, headers: &HeaderMap) -> ApiResult<User> {
    let email = headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ReservaError::NoCredentials("no authenticated user".into()))?;

    let user = context
        .users
        .find_by_email(email)
        .await?
        .ok_or_else(|| ReservaError::NoCredentials(format!("unknown user: {email}")))?;

    Ok(user)
}
