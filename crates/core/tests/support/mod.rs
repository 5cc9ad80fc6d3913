//! Shared test support: in-memory port implementations and builders.

pub mod calendar;
pub mod notify;
pub mod oauth;
pub mod repositories;

use chrono::{DateTime, TimeZone, Utc};
use reserva_domain::{
    Location, NewReservation, Reservation, ReservationKind, ReservationStatus, Role, User,
};
use uuid::Uuid;

/// Fixed test day, hour/minute addressable.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 5, hour, minute, 0).unwrap()
}

/// A user with a valid stored token pair.
pub fn user_with_tokens() -> User {
    User {
        id: Uuid::new_v4(),
        email: "ana@example.org".to_string(),
        name: Some("Ana".to_string()),
        avatar_url: None,
        role: Role::User,
        google_sub: Some("sub-ana".to_string()),
        access_token: Some("access".to_string()),
        refresh_token: Some("refresh".to_string()),
        token_expiry: Some(Utc::now() + chrono::Duration::hours(1)),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A user who never completed the OAuth flow.
pub fn user_without_tokens() -> User {
    User {
        access_token: None,
        refresh_token: None,
        token_expiry: None,
        email: "bea@example.org".to_string(),
        ..user_with_tokens()
    }
}

pub fn admin() -> User {
    User { role: Role::Admin, email: "root@example.org".to_string(), ..user_with_tokens() }
}

pub fn new_reservation(location: Location, start: DateTime<Utc>, end: DateTime<Utc>) -> NewReservation {
    NewReservation {
        title: "Team sync".to_string(),
        description: None,
        start,
        end,
        location,
        kind: ReservationKind::Meeting,
        people_count: 4,
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
        title: "Existing booking".to_string(),
        description: None,
        start,
        end,
        location,
        owner_id: owner.id,
        status: ReservationStatus::Confirmed,
        kind: ReservationKind::Meeting,
        people_count: 4,
        remote_event_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
