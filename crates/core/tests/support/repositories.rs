//! In-memory repository mocks.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reserva_core::{overlaps, ReservationRepository, UserRepository};
use reserva_domain::{Location, ReservaError, Reservation, Result, TokenSet, User};
use uuid::Uuid;

/// In-memory `ReservationRepository`.
///
/// Mirrors the database guard: inserts and updates reject overlapping
/// non-cancelled reservations at the same location, so service tests observe
/// the same `Conflict` the SQLite triggers would raise.
#[derive(Default, Clone)]
pub struct MockReservationRepository {
    rows: Arc<Mutex<Vec<Reservation>>>,
}

impl MockReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Reservation>) -> Self {
        Self { rows: Arc::new(Mutex::new(rows)) }
    }

    pub fn rows(&self) -> Vec<Reservation> {
        self.rows.lock().unwrap().clone()
    }

    /// Seed a row directly, bypassing the overlap guard.
    pub fn with_seed(&self, row: Reservation) {
        self.rows.lock().unwrap().push(row);
    }

    /// Fetch a row that is known to exist.
    pub fn find(&self, id: Uuid) -> Reservation {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .expect("seeded reservation present")
    }

    fn guard_overlap(rows: &[Reservation], candidate: &Reservation) -> Result<()> {
        let clash = rows.iter().any(|r| {
            r.id != candidate.id
                && r.location == candidate.location
                && r.blocks_slot()
                && candidate.blocks_slot()
                && overlaps(candidate.start, candidate.end, r.start, r.end)
        });
        if clash {
            return Err(ReservaError::Conflict("reservation overlap".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MockReservationRepository {
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        Self::guard_overlap(&rows, reservation)?;
        rows.push(reservation.clone());
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        Self::guard_overlap(&rows, reservation)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == reservation.id)
            .ok_or_else(|| ReservaError::NotFound(format!("reservation {}", reservation.id)))?;
        *row = reservation.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(ReservaError::NotFound(format!("reservation {id}")));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list_active_by_location(&self, location: Location) -> Result<Vec<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.location == location && r.blocks_slot())
            .cloned()
            .collect())
    }

    async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<Location>,
    ) -> Result<Vec<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                overlaps(start, end, r.start, r.end)
                    && location.map_or(true, |l| r.location == l)
            })
            .cloned()
            .collect())
    }

    async fn set_remote_event_id(&self, id: Uuid, remote_event_id: Option<&str>) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ReservaError::NotFound(format!("reservation {id}")))?;
        row.remote_event_id = remote_event_id.map(String::from);
        Ok(())
    }
}

/// In-memory `UserRepository`.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    rows: Arc<Mutex<Vec<User>>>,
    token_updates: Arc<Mutex<Vec<(Uuid, TokenSet)>>>,
}

impl MockUserRepository {
    pub fn with_users(rows: Vec<User>) -> Self {
        Self { rows: Arc::new(Mutex::new(rows)), token_updates: Arc::default() }
    }

    pub fn token_updates(&self) -> Vec<(Uuid, TokenSet)> {
        self.token_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.email == user.email) {
            Some(existing) => *existing = user.clone(),
            None => rows.push(user.clone()),
        }
        Ok(())
    }

    async fn update_tokens(&self, user_id: Uuid, tokens: &TokenSet) -> Result<()> {
        self.token_updates.lock().unwrap().push((user_id, tokens.clone()));
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.id == user_id) {
            user.access_token = Some(tokens.access_token.clone());
            if let Some(refresh) = &tokens.refresh_token {
                user.refresh_token = Some(refresh.clone());
            }
            user.token_expiry = tokens.expires_at;
        }
        Ok(())
    }

    async fn clear_tokens(&self, user_id: Uuid) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.id == user_id) {
            user.access_token = None;
            user.refresh_token = None;
            user.token_expiry = None;
        }
        Ok(())
    }
}
