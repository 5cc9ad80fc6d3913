//! Domain constants

/// Reservation start/end minutes snap to this grain.
pub const QUARTER_HOUR_MINUTES: u32 = 15;

/// Minute remainders below this round down; at or above, up to the next
/// quarter.
pub const ROUND_UP_THRESHOLD_MINUTES: u32 = 8;

/// Refresh access tokens this many seconds before their stored expiry.
pub const TOKEN_REFRESH_THRESHOLD_SECONDS: i64 = 60;

/// Bounded timeout for calendar/OAuth HTTP requests.
pub const HTTP_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Calendar id used when none is configured.
pub const DEFAULT_CALENDAR_ID: &str = "primary";
