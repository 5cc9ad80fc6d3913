//! Calendar-facing types
//!
//! `EventDraft` is the provider-neutral payload the sync service builds from
//! a reservation; the Google client maps it to the wire format.
//! `CalendarEventView` is the JSON projection the calendar grid renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reservation::{Location, Reservation, ReservationKind, ReservationStatus};

/// Provider-neutral calendar event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA timezone the provider should render the event in.
    pub timezone: String,
    pub attendees: Vec<String>,
}

/// An event pulled back from the remote calendar for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendees: Vec<String>,
}

/// Reservation projection consumed by the calendar grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventView {
    pub id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Location,
    pub status: ReservationStatus,
    #[serde(rename = "type")]
    pub kind: ReservationKind,
    /// Whether the requesting user may edit this reservation.
    pub editable: bool,
    #[serde(rename = "extendedProps")]
    pub extended_props: CalendarEventProps,
}

/// Extra fields tucked under `extendedProps` for the grid's detail popover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventProps {
    pub description: Option<String>,
    #[serde(rename = "peopleCount")]
    pub people_count: u32,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    #[serde(rename = "remoteEventId")]
    pub remote_event_id: Option<String>,
}

impl CalendarEventView {
    /// Project a reservation for a viewer; `editable` is decided by the
    /// caller (admin or owner).
    pub fn from_reservation(reservation: &Reservation, editable: bool) -> Self {
        Self {
            id: reservation.id,
            title: reservation.title.clone(),
            start: reservation.start,
            end: reservation.end,
            location: reservation.location,
            status: reservation.status,
            kind: reservation.kind,
            editable,
            extended_props: CalendarEventProps {
                description: reservation.description.clone(),
                people_count: reservation.people_count,
                owner_id: reservation.owner_id,
                remote_event_id: reservation.remote_event_id.clone(),
            },
        }
    }
}
