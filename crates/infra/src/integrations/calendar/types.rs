//! Google Calendar wire types

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reserva_domain::{EventDraft, RemoteEvent, ReservaError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Event payload sent to the Google Calendar API.
#[derive(Debug, Serialize)]
pub struct GoogleEventPayload {
    pub summary: String,
    pub description: String,
    pub start: GoogleEventTime,
    pub end: GoogleEventTime,
    pub attendees: Vec<GoogleAttendee>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleEventTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// All-day events carry a bare date instead of a dateTime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleAttendee {
    pub email: String,
}

impl GoogleEventPayload {
    /// Render a provider-neutral draft as a Google payload, expressing the
    /// event times in the draft's target timezone.
    pub fn from_draft(draft: &EventDraft) -> Result<Self> {
        let tz: Tz = draft.timezone.parse().map_err(|_| {
            ReservaError::Config(format!("unknown calendar timezone: {}", draft.timezone))
        })?;

        Ok(Self {
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            start: GoogleEventTime {
                date_time: Some(draft.start.with_timezone(&tz).to_rfc3339()),
                time_zone: Some(draft.timezone.clone()),
                date: None,
            },
            end: GoogleEventTime {
                date_time: Some(draft.end.with_timezone(&tz).to_rfc3339()),
                time_zone: Some(draft.timezone.clone()),
                date: None,
            },
            attendees: draft
                .attendees
                .iter()
                .map(|email| GoogleAttendee { email: email.clone() })
                .collect(),
        })
    }
}

/// Event resource returned by the Google Calendar API.
#[derive(Debug, Deserialize)]
pub struct GoogleEventResource {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<GoogleEventTime>,
    pub end: Option<GoogleEventTime>,
    pub attendees: Option<Vec<GoogleAttendee>>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleEventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleEventResource>,
}

impl GoogleEventResource {
    /// Convert into the domain representation.
    ///
    /// Events without parseable start/end times (e.g. cancelled stubs from
    /// the API) are dropped with a warning rather than failing the whole
    /// listing.
    pub fn into_remote_event(self) -> Option<RemoteEvent> {
        let start = self.start.as_ref().and_then(parse_event_time);
        let end = self.end.as_ref().and_then(parse_event_time);

        let (Some(start), Some(end)) = (start, end) else {
            warn!(event_id = %self.id, "skipping event without usable start/end");
            return None;
        };

        Some(RemoteEvent {
            id: self.id,
            summary: self.summary,
            description: self.description,
            start,
            end,
            attendees: self
                .attendees
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.email)
                .collect(),
        })
    }
}

fn parse_event_time(time: &GoogleEventTime) -> Option<DateTime<Utc>> {
    if let Some(date_time) = time.date_time.as_deref() {
        return DateTime::parse_from_rfc3339(date_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    // all-day: interpret the bare date as midnight UTC
    let date = chrono::NaiveDate::parse_from_str(time.date.as_deref()?, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Id-bearing response from insert/patch calls.
#[derive(Debug, Deserialize)]
pub struct GoogleEventCreated {
    pub id: String,
}
