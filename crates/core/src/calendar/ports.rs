//! Port interface for the remote calendar provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reserva_domain::{EventDraft, RemoteEvent, Result};

/// Trait for calendar provider event CRUD
///
/// Implementations map provider error codes to domain error kinds at this
/// boundary; callers never inspect provider error text. Mutating calls must
/// not retry internally (a retried insert could duplicate remote events);
/// `list_events` may retry once.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Create an event and return the provider-assigned id.
    async fn insert_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<String>;

    /// Replace the mutable fields of an existing event.
    async fn patch_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
        draft: &EventDraft,
    ) -> Result<String>;

    /// Delete an event. Deleting an already-removed event is not an error.
    async fn delete_event(&self, access_token: &str, calendar_id: &str, event_id: &str)
        -> Result<()>;

    /// List events intersecting `[start, end)`.
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RemoteEvent>>;
}
