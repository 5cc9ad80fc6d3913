//! Google sign-in handler

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use reserva_domain::User;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub code: String,
    pub redirect_uri: String,
}

/// `POST /api/auth/google`
///
/// Completes the authorization-code flow started by the frontend and returns
/// the provisioned user. Token fields never serialize.
pub async fn sign_in(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<Json<User>> {
    let user = context
        .sign_in
        .sign_in_with_code(&request.code, &request.redirect_uri)
        .await?;
    Ok(Json(user))
}
