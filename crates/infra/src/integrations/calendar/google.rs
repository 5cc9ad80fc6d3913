//! Google Calendar API client
//!
//! Implements the `CalendarApi` port against the Calendar v3 REST API.
//! Provider error codes are mapped to domain error kinds here, at the
//! boundary; callers never inspect response bodies. Mutating calls are never
//! retried (a retried insert could duplicate the remote event); the
//! idempotent listing gets a single retry with jittered backoff.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use reserva_core::CalendarApi;
use reserva_domain::constants::HTTP_REQUEST_TIMEOUT_SECONDS;
use reserva_domain::{EventDraft, RemoteEvent, ReservaError, Result};
use tracing::{debug, warn};

use super::types::{GoogleEventCreated, GoogleEventPayload, GoogleEventsResponse};
use crate::errors::InfraError;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client
pub struct GoogleCalendarClient {
    http: Client,
    base_url: String,
}

impl GoogleCalendarClient {
    /// Create a client against the production API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GOOGLE_CALENDAR_API_BASE.to_string())
    }

    /// Create a client against an alternative base URL (tests).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(InfraError::from)?;
        Ok(Self { http, base_url })
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!("{}/calendars/{}/events", self.base_url, calendar_id)
    }

    fn event_url(&self, calendar_id: &str, event_id: &str) -> String {
        format!("{}/{}", self.events_url(calendar_id), event_id)
    }
}

/// Map a non-success Calendar API status to a domain error.
fn map_status(status: StatusCode, body: &str) -> ReservaError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ReservaError::NoCredentials(format!(
            "calendar API rejected the access token ({status})"
        )),
        StatusCode::NOT_FOUND => ReservaError::NotFound("remote calendar event not found".into()),
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            ReservaError::Network(format!("calendar API throttled the request ({status})"))
        }
        status if status.is_server_error() => {
            ReservaError::Network(format!("calendar API server error ({status})"))
        }
        status => ReservaError::Sync(format!("calendar API error ({status}): {body}")),
    }
}

async fn error_from_response(response: reqwest::Response) -> ReservaError {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
    map_status(status, &body)
}

/// Jittered delay before the single list retry.
fn retry_delay() -> Duration {
    use rand::Rng;
    Duration::from_millis(rand::thread_rng().gen_range(100..400))
}

#[async_trait]
impl CalendarApi for GoogleCalendarClient {
    async fn insert_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<String> {
        let payload = GoogleEventPayload::from_draft(draft)?;

        let response = self
            .http
            .post(self.events_url(calendar_id))
            .bearer_auth(access_token)
            .json(&payload)
            .send()
            .await
            .map_err(InfraError::from)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let created: GoogleEventCreated = response.json().await.map_err(InfraError::from)?;
        debug!(event_id = %created.id, calendar_id, "event inserted");
        Ok(created.id)
    }

    async fn patch_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
        draft: &EventDraft,
    ) -> Result<String> {
        let payload = GoogleEventPayload::from_draft(draft)?;

        let response = self
            .http
            .patch(self.event_url(calendar_id, event_id))
            .bearer_auth(access_token)
            .json(&payload)
            .send()
            .await
            .map_err(InfraError::from)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let updated: GoogleEventCreated = response.json().await.map_err(InfraError::from)?;
        Ok(updated.id)
    }

    async fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<()> {
        let response = self
            .http
            .delete(self.event_url(calendar_id, event_id))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(InfraError::from)?;

        // An already-removed event still counts as deleted.
        if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::GONE) {
            debug!(event_id, "remote event already gone");
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RemoteEvent>> {
        let query = [
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("timeMin", start.to_rfc3339()),
            ("timeMax", end.to_rfc3339()),
            ("timeZone", "UTC".to_string()),
        ];

        let mut attempt = 0;
        loop {
            let result = self
                .http
                .get(self.events_url(calendar_id))
                .bearer_auth(access_token)
                .query(&query)
                .send()
                .await;

            let retryable = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(_) => true,
            };

            if retryable && attempt == 0 {
                attempt += 1;
                warn!(calendar_id, "event listing failed, retrying once");
                tokio::time::sleep(retry_delay()).await;
                continue;
            }

            let response = result.map_err(InfraError::from)?;
            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            let listing: GoogleEventsResponse = response.json().await.map_err(InfraError::from)?;
            return Ok(listing
                .items
                .into_iter()
                .filter_map(super::types::GoogleEventResource::into_remote_event)
                .collect());
        }
    }
}
