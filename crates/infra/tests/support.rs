//! Shared test support for infra integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use reserva_core::UserRepository;
use reserva_domain::{
    Location, Reservation, ReservationKind, ReservationStatus, Role, User,
};
use reserva_infra::database::{DbManager, SqliteUserRepository};
use tempfile::TempDir;
use uuid::Uuid;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new migrated temporary database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should run");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Insert a user row and return it.
    pub async fn seed_user(&self) -> User {
        let user = test_user();
        SqliteUserRepository::new(self.manager.clone())
            .upsert(&user)
            .await
            .expect("user should be inserted");
        user
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 5, hour, minute, 0).unwrap()
}

pub fn test_user() -> User {
    User {
        id: Uuid::new_v4(),
        email: format!("user-{}@example.org", Uuid::new_v4().simple()),
        name: Some("Ana".to_string()),
        avatar_url: None,
        role: Role::User,
        google_sub: Some("sub-1".to_string()),
        access_token: None,
        refresh_token: None,
        token_expiry: None,
        created_at: at(8, 0),
        updated_at: at(8, 0),
    }
}

pub fn reservation(
    owner: &User,
    location: Location,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        title: "Team sync".to_string(),
        description: Some("weekly".to_string()),
        start,
        end,
        location,
        owner_id: owner.id,
        status: ReservationStatus::Pending,
        kind: ReservationKind::Meeting,
        people_count: 4,
        remote_event_id: None,
        created_at: at(8, 0),
        updated_at: at(8, 0),
    }
}
