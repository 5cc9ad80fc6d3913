//! Reservation types
//!
//! A reservation books one location for a half-open `[start, end)` interval.
//! The `remote_event_id` links the row to its mirrored Google Calendar event
//! once the first sync succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ReservaError;

/// Fixed set of bookable physical locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Garden,
    Casino,
    Lounge,
}

impl Location {
    /// All known locations, in display order.
    pub const ALL: [Self; 3] = [Self::Garden, Self::Casino, Self::Lounge];

    /// Stable lowercase identifier used in storage and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Garden => "garden",
            Self::Casino => "casino",
            Self::Lounge => "lounge",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Location {
    type Err = ReservaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "garden" => Ok(Self::Garden),
            "casino" => Ok(Self::Casino),
            "lounge" => Ok(Self::Lounge),
            other => Err(ReservaError::Validation(format!("unknown location: {other}"))),
        }
    }
}

/// Reservation lifecycle status.
///
/// `pending -> confirmed -> completed`, with `cancelled` reachable from
/// `pending` or `confirmed`. Cancelled reservations no longer block their
/// time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Whether the reservation still occupies its time slot.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether a status change to `next` is a legal transition.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ReservaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(ReservaError::Validation(format!("unknown status: {other}"))),
        }
    }
}

/// What the reservation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationKind {
    Meeting,
    Event,
    Appointment,
    Other,
}

impl ReservationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Event => "event",
            Self::Appointment => "appointment",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for ReservationKind {
    type Err = ReservaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(Self::Meeting),
            "event" => Ok(Self::Event),
            "appointment" => Ok(Self::Appointment),
            "other" => Ok(Self::Other),
            other => Err(ReservaError::Validation(format!("unknown reservation kind: {other}"))),
        }
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Location,
    pub owner_id: Uuid,
    pub status: ReservationStatus,
    pub kind: ReservationKind,
    pub people_count: u32,
    /// Google event id, set after the first successful sync.
    pub remote_event_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation blocks its `[start, end)` slot.
    pub fn blocks_slot(&self) -> bool {
        self.status.is_active()
    }
}

/// Input for creating a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Location,
    pub kind: ReservationKind,
    pub people_count: u32,
}

/// Allow-listed mutable fields for reservation updates.
///
/// Every mutable field is named explicitly; unknown fields in the incoming
/// JSON are rejected rather than mass-assigned onto the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReservationPatch {
    #[serde(default)]
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub kind: Option<ReservationKind>,
    #[serde(default)]
    pub people_count: Option<u32>,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

impl ReservationPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.location.is_none()
            && self.kind.is_none()
            && self.people_count.is_none()
            && self.status.is_none()
    }

    /// Whether the patch moves the reservation in time or space.
    pub fn changes_slot(&self) -> bool {
        self.start.is_some() || self.end.is_some() || self.location.is_some()
    }
}

mod double_option {
    //! Distinguishes an absent field from an explicit `null`.

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
