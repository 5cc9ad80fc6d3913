//! Port interfaces for reservation persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reserva_domain::{Location, Reservation, Result, TokenSet, User};
use uuid::Uuid;

/// Trait for persisting reservations
///
/// `insert` and `update` must be atomic with respect to the overlap
/// invariant: the store is the authoritative guard against two concurrent
/// writers claiming the same slot and returns `ReservaError::Conflict` when
/// a non-cancelled same-location reservation already covers the window.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation.
    async fn insert(&self, reservation: &Reservation) -> Result<()>;

    /// Persist changed fields of an existing reservation.
    async fn update(&self, reservation: &Reservation) -> Result<()>;

    /// Hard-delete a reservation.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Fetch a reservation by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>>;

    /// All non-cancelled reservations at a location, for availability
    /// pre-checks.
    async fn list_active_by_location(&self, location: Location) -> Result<Vec<Reservation>>;

    /// Reservations intersecting `[start, end)`, optionally filtered by
    /// location, for the calendar grid.
    async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<Location>,
    ) -> Result<Vec<Reservation>>;

    /// Record (or clear) the linked remote calendar event id.
    async fn set_remote_event_id(&self, id: Uuid, remote_event_id: Option<&str>) -> Result<()>;
}

/// Trait for persisting users and their OAuth tokens
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a user or refresh the profile fields of an existing one
    /// (matched on email).
    async fn upsert(&self, user: &User) -> Result<()>;

    /// Persist a refreshed token set. Access and refresh tokens are written
    /// together; a token set without a rotated refresh token keeps the
    /// stored one.
    async fn update_tokens(&self, user_id: Uuid, tokens: &TokenSet) -> Result<()>;

    /// Drop both tokens and the expiry (sign-out / revocation).
    async fn clear_tokens(&self, user_id: Uuid) -> Result<()>;
}
