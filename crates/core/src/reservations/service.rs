//! Reservation lifecycle orchestration
//!
//! Validates and persists reservation mutations, then runs the best-effort
//! legs (calendar sync, notifications). Only validation, conflict, and
//! not-found errors propagate to the caller; everything downstream of the
//! local write is reported through [`SyncOutcome`] instead of failing the
//! operation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reserva_domain::{
    CalendarEventView, Location, NewReservation, ReservaError, Reservation, ReservationPatch,
    ReservationStatus, Result, User,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::availability::is_available;
use super::ports::{ReservationRepository, UserRepository};
use super::quantize::quantize;
use crate::calendar::CalendarSyncService;
use crate::notify::Notifier;

/// How the best-effort sync leg of a reservation operation went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The remote mirror was brought up to date.
    Synced,
    /// Sync was not attempted (no stored credentials, or nothing to do).
    Skipped,
    /// Sync was attempted and failed; the local operation still succeeded.
    Warning(String),
}

/// Result of a reservation mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationOutcome {
    pub reservation: Reservation,
    pub sync: SyncOutcome,
}

/// Reservation lifecycle service
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    users: Arc<dyn UserRepository>,
    sync: Arc<CalendarSyncService>,
    notifier: Arc<dyn Notifier>,
}

impl ReservationService {
    /// Create a new lifecycle service.
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        users: Arc<dyn UserRepository>,
        sync: Arc<CalendarSyncService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { reservations, users, sync, notifier }
    }

    /// Create a reservation owned by `owner`.
    ///
    /// Quantizes the requested window, verifies availability, persists with
    /// status `pending`, then runs the best-effort sync and confirmation
    /// legs.
    #[instrument(skip(self, input, owner), fields(owner_email = %owner.email))]
    pub async fn create_reservation(
        &self,
        input: NewReservation,
        owner: &User,
    ) -> Result<ReservationOutcome> {
        let start = quantize(input.start);
        let end = quantize(input.end);
        validate_fields(&input.title, input.people_count, start, end)?;

        let existing = self.reservations.list_active_by_location(input.location).await?;
        if !is_available(&existing, input.location, start, end, None) {
            return Err(conflict(input.location, start, end));
        }

        let now = Utc::now();
        let mut reservation = Reservation {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            start,
            end,
            location: input.location,
            owner_id: owner.id,
            status: ReservationStatus::Pending,
            kind: input.kind,
            people_count: input.people_count,
            remote_event_id: None,
            created_at: now,
            updated_at: now,
        };

        // The store revalidates overlap inside its own transaction; a
        // concurrent writer that got there first surfaces as Conflict here.
        self.reservations.insert(&reservation).await?;

        info!(reservation_id = %reservation.id, location = %reservation.location, "reservation created");

        let sync = self.attempt_sync(&mut reservation, owner).await;
        self.notify_confirmed(&reservation).await;

        Ok(ReservationOutcome { reservation, sync })
    }

    /// Apply an allow-listed patch to a reservation.
    ///
    /// A patch that moves the reservation in time or space is re-validated
    /// against availability, excluding the reservation itself. Sync and
    /// change notifications run only when a field actually changed.
    #[instrument(skip(self, patch))]
    pub async fn update_reservation(
        &self,
        id: Uuid,
        patch: ReservationPatch,
    ) -> Result<ReservationOutcome> {
        let current = self.fetch(id).await?;
        let mut updated = apply_patch(&current, patch)?;

        if updated == current {
            return Ok(ReservationOutcome { reservation: current, sync: SyncOutcome::Skipped });
        }

        validate_fields(&updated.title, updated.people_count, updated.start, updated.end)?;

        let slot_moved = (updated.start, updated.end, updated.location)
            != (current.start, current.end, current.location);
        if slot_moved {
            let existing =
                self.reservations.list_active_by_location(updated.location).await?;
            if !is_available(&existing, updated.location, updated.start, updated.end, Some(id)) {
                return Err(conflict(updated.location, updated.start, updated.end));
            }
        }

        updated.updated_at = Utc::now();
        self.reservations.update(&updated).await?;

        info!(reservation_id = %id, slot_moved, "reservation updated");

        let sync = match self.owner_of(&updated).await {
            Some(owner) if updated.status == ReservationStatus::Cancelled => {
                // A cancelled reservation frees its slot; remove the mirror
                // instead of patching it.
                self.attempt_remote_delete(&mut updated, &owner).await
            }
            Some(owner) => self.attempt_sync(&mut updated, &owner).await,
            None => SyncOutcome::Skipped,
        };

        self.notify_changed(&updated).await;

        Ok(ReservationOutcome { reservation: updated, sync })
    }

    /// Hard-delete a reservation, removing its remote mirror best-effort
    /// first.
    #[instrument(skip(self))]
    pub async fn delete_reservation(&self, id: Uuid) -> Result<SyncOutcome> {
        let mut reservation = self.fetch(id).await?;

        let sync = match self.owner_of(&reservation).await {
            Some(owner) => self.attempt_remote_delete(&mut reservation, &owner).await,
            None => SyncOutcome::Skipped,
        };

        self.reservations.delete(id).await?;

        info!(reservation_id = %id, "reservation deleted");

        self.notify_cancelled(&reservation).await;

        Ok(sync)
    }

    /// Whether `[start, end)` at `location` is free, after quantization.
    pub async fn check_availability(
        &self,
        location: Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let start = quantize(start);
        let end = quantize(end);
        if start >= end {
            return Err(ReservaError::Validation("end must be after start".into()));
        }

        let existing = self.reservations.list_active_by_location(location).await?;
        Ok(is_available(&existing, location, start, end, exclude))
    }

    /// Reservations intersecting `[start, end)` projected for the calendar
    /// grid, with `editable` computed for `caller`.
    pub async fn list_reservation_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<Location>,
        caller: &User,
    ) -> Result<Vec<CalendarEventView>> {
        if start >= end {
            return Err(ReservaError::Validation("end must be after start".into()));
        }

        let rows = self.reservations.list_in_range(start, end, location).await?;
        Ok(rows
            .iter()
            .map(|r| {
                let editable = caller.is_admin() || r.owner_id == caller.id;
                CalendarEventView::from_reservation(r, editable)
            })
            .collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReservaError::NotFound(format!("reservation {id}")))
    }

    /// Resolve the reservation's owner for sync purposes. A missing owner
    /// row is logged and treated as "nothing to sync".
    async fn owner_of(&self, reservation: &Reservation) -> Option<User> {
        match self.users.find_by_id(reservation.owner_id).await {
            Ok(Some(owner)) => Some(owner),
            Ok(None) => {
                warn!(
                    reservation_id = %reservation.id,
                    owner_id = %reservation.owner_id,
                    "reservation owner not found, skipping sync"
                );
                None
            }
            Err(e) => {
                warn!(reservation_id = %reservation.id, error = %e, "owner lookup failed, skipping sync");
                None
            }
        }
    }

    /// Best-effort upsert of the remote mirror.
    async fn attempt_sync(&self, reservation: &mut Reservation, owner: &User) -> SyncOutcome {
        if owner.credentials().is_none() {
            info!(
                reservation_id = %reservation.id,
                owner_email = %owner.email,
                "owner has no calendar credentials, sync skipped"
            );
            return SyncOutcome::Skipped;
        }

        match self.sync.sync_reservation(reservation, owner).await {
            Ok(remote_id) => {
                reservation.remote_event_id = Some(remote_id);
                SyncOutcome::Synced
            }
            Err(e) => {
                warn!(reservation_id = %reservation.id, error = %e, "calendar sync failed");
                SyncOutcome::Warning(e.to_string())
            }
        }
    }

    /// Best-effort removal of the remote mirror.
    async fn attempt_remote_delete(
        &self,
        reservation: &mut Reservation,
        owner: &User,
    ) -> SyncOutcome {
        if reservation.remote_event_id.is_none() {
            return SyncOutcome::Skipped;
        }
        if owner.credentials().is_none() {
            info!(
                reservation_id = %reservation.id,
                owner_email = %owner.email,
                "owner has no calendar credentials, remote delete skipped"
            );
            return SyncOutcome::Skipped;
        }

        match self.sync.delete_remote_event(reservation, owner).await {
            Ok(()) => {
                reservation.remote_event_id = None;
                SyncOutcome::Synced
            }
            Err(e) => {
                warn!(reservation_id = %reservation.id, error = %e, "remote event delete failed");
                SyncOutcome::Warning(e.to_string())
            }
        }
    }

    async fn notify_confirmed(&self, reservation: &Reservation) {
        if let Err(e) = self.notifier.reservation_confirmed(reservation).await {
            warn!(reservation_id = %reservation.id, error = %e, "confirmation notification failed");
        }
    }

    async fn notify_changed(&self, reservation: &Reservation) {
        if let Err(e) = self.notifier.reservation_changed(reservation).await {
            warn!(reservation_id = %reservation.id, error = %e, "change notification failed");
        }
    }

    async fn notify_cancelled(&self, reservation: &Reservation) {
        if let Err(e) = self.notifier.reservation_cancelled(reservation).await {
            warn!(reservation_id = %reservation.id, error = %e, "cancellation notification failed");
        }
    }
}

/// Field-level validation shared by create and update.
fn validate_fields(
    title: &str,
    people_count: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ReservaError::Validation("title must not be empty".into()));
    }
    if people_count == 0 {
        return Err(ReservaError::Validation("people_count must be at least 1".into()));
    }
    if start >= end {
        return Err(ReservaError::Validation("end must be after start".into()));
    }
    Ok(())
}

fn conflict(location: Location, start: DateTime<Utc>, end: DateTime<Utc>) -> ReservaError {
    ReservaError::Conflict(format!(
        "{location} is already booked between {} and {}",
        start.format("%Y-%m-%d %H:%M"),
        end.format("%H:%M"),
    ))
}

/// Apply an allow-listed patch, quantizing any new window and validating
/// status transitions.
fn apply_patch(current: &Reservation, patch: ReservationPatch) -> Result<Reservation> {
    let mut updated = current.clone();

    if let Some(title) = patch.title {
        updated.title = title;
    }
    if let Some(description) = patch.description {
        updated.description = description;
    }
    if let Some(start) = patch.start {
        updated.start = quantize(start);
    }
    if let Some(end) = patch.end {
        updated.end = quantize(end);
    }
    if let Some(location) = patch.location {
        updated.location = location;
    }
    if let Some(kind) = patch.kind {
        updated.kind = kind;
    }
    if let Some(people_count) = patch.people_count {
        updated.people_count = people_count;
    }
    if let Some(status) = patch.status {
        if status != current.status {
            if !current.status.can_transition_to(status) {
                return Err(ReservaError::Validation(format!(
                    "cannot move reservation from {} to {}",
                    current.status.as_str(),
                    status.as_str()
                )));
            }
            updated.status = status;
        }
    }

    Ok(updated)
}
