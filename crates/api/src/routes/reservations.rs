//! Reservation CRUD and availability handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use reserva_core::{ReservationOutcome, SyncOutcome};
use reserva_domain::{Location, NewReservation, ReservationPatch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_user;
use crate::context::AppContext;
use crate::error::ApiResult;

/// `POST /api/reservations`
pub async fn create(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(input): Json<NewReservation>,
) -> ApiResult<(StatusCode, Json<ReservationOutcome>)> {
    let caller = current_user(&context, &headers).await?;
    let outcome = context.reservations.create_reservation(input, &caller).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// `PATCH /api/reservations/{id}`
pub async fn update(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReservationPatch>,
) -> ApiResult<Json<ReservationOutcome>> {
    // identity is required even though ownership checks live in the gateway
    let _caller = current_user(&context, &headers).await?;
    let outcome = context.reservations.update_reservation(id, patch).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub sync: SyncOutcome,
}

/// `DELETE /api/reservations/{id}`
pub async fn delete(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let _caller = current_user(&context, &headers).await?;
    let sync = context.reservations.delete_reservation(id).await?;
    Ok(Json(DeleteResponse { sync }))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub location: Location,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub exclude: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// `GET /api/availability`
pub async fn availability(
    State(context): State<Arc<AppContext>>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let available = context
        .reservations
        .check_availability(query.location, query.start, query.end, query.exclude)
        .await?;
    Ok(Json(AvailabilityResponse { available }))
}
