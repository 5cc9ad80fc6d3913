//! Recording mock for the `CalendarApi` port.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reserva_core::CalendarApi;
use reserva_domain::{EventDraft, RemoteEvent, ReservaError, Result};

/// In-memory `CalendarApi` that records every call.
///
/// Each mutating operation can be armed to fail, to exercise the
/// best-effort paths of the lifecycle manager.
#[derive(Default, Clone)]
pub struct MockCalendarApi {
    pub inserts: Arc<Mutex<Vec<EventDraft>>>,
    pub patches: Arc<Mutex<Vec<(String, EventDraft)>>>,
    pub deletes: Arc<Mutex<Vec<String>>>,
    fail_inserts: Arc<Mutex<bool>>,
    fail_patches: Arc<Mutex<bool>>,
    fail_deletes: Arc<Mutex<bool>>,
    remote_events: Arc<Mutex<Vec<RemoteEvent>>>,
}

impl MockCalendarApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_inserts(self) -> Self {
        *self.fail_inserts.lock().unwrap() = true;
        self
    }

    pub fn fail_patches(self) -> Self {
        *self.fail_patches.lock().unwrap() = true;
        self
    }

    pub fn fail_deletes(self) -> Self {
        *self.fail_deletes.lock().unwrap() = true;
        self
    }

    pub fn with_remote_events(self, events: Vec<RemoteEvent>) -> Self {
        *self.remote_events.lock().unwrap() = events;
        self
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }

    pub fn patch_count(&self) -> usize {
        self.patches.lock().unwrap().len()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.lock().unwrap().len()
    }
}

#[async_trait]
impl CalendarApi for MockCalendarApi {
    async fn insert_event(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<String> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(ReservaError::Network("insert refused".into()));
        }
        let mut inserts = self.inserts.lock().unwrap();
        inserts.push(draft.clone());
        Ok(format!("remote-{}", inserts.len()))
    }

    async fn patch_event(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        event_id: &str,
        draft: &EventDraft,
    ) -> Result<String> {
        if *self.fail_patches.lock().unwrap() {
            return Err(ReservaError::Network("patch refused".into()));
        }
        self.patches.lock().unwrap().push((event_id.to_string(), draft.clone()));
        Ok(event_id.to_string())
    }

    async fn delete_event(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        event_id: &str,
    ) -> Result<()> {
        if *self.fail_deletes.lock().unwrap() {
            return Err(ReservaError::Network("delete refused".into()));
        }
        self.deletes.lock().unwrap().push(event_id.to_string());
        Ok(())
    }

    async fn list_events(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<RemoteEvent>> {
        Ok(self.remote_events.lock().unwrap().clone())
    }
}
