//! Quarter-hour quantization
//!
//! Reservation boundaries snap to a 15-minute grid before any availability
//! check and before persistence. A minute remainder below 8 rounds down,
//! otherwise up to the next quarter; seconds are always dropped.

use chrono::{DateTime, Duration, Timelike, Utc};
use reserva_domain::constants::{QUARTER_HOUR_MINUTES, ROUND_UP_THRESHOLD_MINUTES};

/// Snap a timestamp's minute component to the nearest quarter hour.
///
/// Idempotent: an already-quantized timestamp is returned unchanged.
/// Rounding up at minute 53 or later rolls into the next hour (and day,
/// where applicable).
pub fn quantize(ts: DateTime<Utc>) -> DateTime<Utc> {
    let floored = ts - Duration::seconds(i64::from(ts.second()))
        - Duration::nanoseconds(i64::from(ts.nanosecond()));

    let remainder = floored.minute() % QUARTER_HOUR_MINUTES;
    if remainder == 0 {
        return floored;
    }

    if remainder < ROUND_UP_THRESHOLD_MINUTES {
        floored - Duration::minutes(i64::from(remainder))
    } else {
        floored + Duration::minutes(i64::from(QUARTER_HOUR_MINUTES - remainder))
    }
}
