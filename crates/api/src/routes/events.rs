//! Calendar grid projection handler

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use reserva_domain::{CalendarEventView, Location};
use serde::Deserialize;

use super::current_user;
use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// `GET /api/events`
pub async fn list(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<CalendarEventView>>> {
    let caller = current_user(&context, &headers).await?;
    let events = context
        .reservations
        .list_reservation_events(query.start, query.end, query.location, &caller)
        .await?;
    Ok(Json(events))
}

/// `GET /api/events/remote`
///
/// Pulls the caller's Google Calendar events for display alongside local
/// reservations. Read-only; requires stored credentials.
pub async fn list_remote(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<reserva_domain::RemoteEvent>>> {
    let caller = current_user(&context, &headers).await?;
    let events = context
        .calendar_sync
        .fetch_remote_events(&caller, query.start, query.end)
        .await?;
    Ok(Json(events))
}
