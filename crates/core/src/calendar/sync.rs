//! Calendar sync service
//!
//! Mirrors local reservations as remote calendar events. The local record is
//! the source of truth; the remote calendar may lag or be absent. Upserts
//! are keyed on the presence of `remote_event_id`: one insert per
//! reservation ever, everything after that is a patch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reserva_domain::{EventDraft, RemoteEvent, Reservation, Result, User};
use tracing::{debug, info, instrument};

use super::ports::CalendarApi;
use crate::auth::TokenManager;
use crate::reservations::ports::ReservationRepository;

/// Calendar sync service
pub struct CalendarSyncService {
    api: Arc<dyn CalendarApi>,
    token_manager: Arc<TokenManager>,
    reservations: Arc<dyn ReservationRepository>,
    calendar_id: String,
    timezone: String,
}

impl CalendarSyncService {
    /// Create a new sync service targeting one calendar.
    pub fn new(
        api: Arc<dyn CalendarApi>,
        token_manager: Arc<TokenManager>,
        reservations: Arc<dyn ReservationRepository>,
        calendar_id: String,
        timezone: String,
    ) -> Self {
        Self { api, token_manager, reservations, calendar_id, timezone }
    }

    /// Idempotent upsert: insert when the reservation has never been synced,
    /// patch afterwards. Returns the remote event id.
    #[instrument(skip(self, reservation, owner), fields(reservation_id = %reservation.id))]
    pub async fn sync_reservation(
        &self,
        reservation: &Reservation,
        owner: &User,
    ) -> Result<String> {
        match reservation.remote_event_id.as_deref() {
            Some(_) => self.update_remote_event(reservation, owner).await,
            None => self.create_remote_event(reservation, owner).await,
        }
    }

    /// Create the mirrored event and persist its id onto the reservation.
    ///
    /// Callers must route through [`Self::sync_reservation`] once a remote id
    /// exists; a second insert for the same reservation would duplicate the
    /// event.
    pub async fn create_remote_event(
        &self,
        reservation: &Reservation,
        owner: &User,
    ) -> Result<String> {
        let token = self.token_manager.get_valid_access_token(owner).await?;
        let draft = self.build_event_draft(reservation, owner);

        let remote_id = self.api.insert_event(&token, &self.calendar_id, &draft).await?;

        self.reservations.set_remote_event_id(reservation.id, Some(&remote_id)).await?;

        info!(
            reservation_id = %reservation.id,
            remote_event_id = %remote_id,
            "created remote calendar event"
        );

        Ok(remote_id)
    }

    /// Patch the mirrored event with the reservation's current fields.
    pub async fn update_remote_event(
        &self,
        reservation: &Reservation,
        owner: &User,
    ) -> Result<String> {
        let remote_id = reservation.remote_event_id.as_deref().ok_or_else(|| {
            reserva_domain::ReservaError::Sync(format!(
                "reservation {} has no remote event to update",
                reservation.id
            ))
        })?;

        let token = self.token_manager.get_valid_access_token(owner).await?;
        let draft = self.build_event_draft(reservation, owner);

        let remote_id =
            self.api.patch_event(&token, &self.calendar_id, remote_id, &draft).await?;

        debug!(
            reservation_id = %reservation.id,
            remote_event_id = %remote_id,
            "updated remote calendar event"
        );

        Ok(remote_id)
    }

    /// Remove the mirrored event and clear the stored id.
    ///
    /// A reservation without a remote id is a no-op.
    pub async fn delete_remote_event(&self, reservation: &Reservation, owner: &User) -> Result<()> {
        let Some(remote_id) = reservation.remote_event_id.as_deref() else {
            debug!(reservation_id = %reservation.id, "no remote event to delete");
            return Ok(());
        };

        let token = self.token_manager.get_valid_access_token(owner).await?;
        self.api.delete_event(&token, &self.calendar_id, remote_id).await?;
        self.reservations.set_remote_event_id(reservation.id, None).await?;

        info!(
            reservation_id = %reservation.id,
            remote_event_id = %remote_id,
            "deleted remote calendar event"
        );

        Ok(())
    }

    /// Pull provider events for display in the UI grid. Read-only.
    pub async fn fetch_remote_events(
        &self,
        owner: &User,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RemoteEvent>> {
        let token = self.token_manager.get_valid_access_token(owner).await?;
        self.api.list_events(&token, &self.calendar_id, start, end).await
    }

    /// Translate a reservation into the provider-neutral event payload.
    fn build_event_draft(&self, reservation: &Reservation, owner: &User) -> EventDraft {
        let responsible = owner.name.as_deref().unwrap_or(&owner.email);

        let mut description = format!(
            "Responsible: {responsible}\nPeople: {}\nType: {}\nLocation: {}",
            reservation.people_count,
            reservation.kind.as_str(),
            reservation.location.as_str(),
        );
        if let Some(notes) = reservation.description.as_deref() {
            description.push_str("\n\n");
            description.push_str(notes);
        }

        EventDraft {
            summary: reservation.title.clone(),
            description,
            start: reservation.start,
            end: reservation.end,
            timezone: self.timezone.clone(),
            attendees: vec![owner.email.clone()],
        }
    }
}
