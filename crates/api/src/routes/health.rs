//! Health check handler

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health`
pub async fn health(State(context): State<Arc<AppContext>>) -> ApiResult<Json<HealthResponse>> {
    context.db.health_check()?;
    Ok(Json(HealthResponse { status: "ok" }))
}
