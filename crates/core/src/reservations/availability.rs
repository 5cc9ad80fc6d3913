//! Availability checking
//!
//! Pure functions over a snapshot of existing reservations. The database
//! overlap guard is the authoritative defence against concurrent writers;
//! these checks produce the user-facing conflict answer.

use chrono::{DateTime, Utc};
use reserva_domain::{Location, Reservation};
use uuid::Uuid;

/// Half-open interval overlap: `[a1, a2)` and `[b1, b2)` overlap iff
/// `a1 < b2 && b1 < a2`. Back-to-back intervals sharing a boundary do not
/// overlap; full containment does.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether `[start, end)` at `location` is free of conflicts among
/// `existing`.
///
/// Cancelled reservations never block a slot. `exclude` skips one
/// reservation by id, used when editing so a reservation cannot conflict
/// with itself. No side effects; deterministic for a given snapshot.
pub fn is_available(
    existing: &[Reservation],
    location: Location,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> bool {
    !existing.iter().any(|r| {
        r.location == location
            && r.blocks_slot()
            && exclude != Some(r.id)
            && overlaps(start, end, r.start, r.end)
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use reserva_domain::{ReservationKind, ReservationStatus};

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0).unwrap()
    }

    fn reservation(
        location: Location,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: ReservationStatus,
    ) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            title: "Existing booking".to_string(),
            description: None,
            start,
            end,
            location,
            owner_id: Uuid::new_v4(),
            status,
            kind: ReservationKind::Meeting,
            people_count: 4,
            remote_event_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn overlapping_request_at_same_location_is_unavailable() {
        let existing =
            vec![reservation(Location::Garden, at(10, 0), at(11, 0), ReservationStatus::Confirmed)];
        assert!(!is_available(&existing, Location::Garden, at(10, 30), at(11, 30), None));
    }

    #[test]
    fn same_window_at_another_location_is_available() {
        let existing =
            vec![reservation(Location::Garden, at(10, 0), at(11, 0), ReservationStatus::Confirmed)];
        assert!(is_available(&existing, Location::Casino, at(10, 30), at(11, 30), None));
    }

    #[test]
    fn back_to_back_bookings_do_not_conflict() {
        let existing =
            vec![reservation(Location::Garden, at(10, 0), at(11, 0), ReservationStatus::Confirmed)];
        assert!(is_available(&existing, Location::Garden, at(11, 0), at(12, 0), None));
        assert!(is_available(&existing, Location::Garden, at(9, 0), at(10, 0), None));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let existing =
            vec![reservation(Location::Garden, at(10, 0), at(12, 0), ReservationStatus::Confirmed)];
        // request inside existing
        assert!(!is_available(&existing, Location::Garden, at(10, 30), at(11, 0), None));
        // request swallowing existing
        assert!(!is_available(&existing, Location::Garden, at(9, 0), at(13, 0), None));
    }

    #[test]
    fn cancelled_reservations_do_not_block() {
        let existing =
            vec![reservation(Location::Garden, at(10, 0), at(11, 0), ReservationStatus::Cancelled)];
        assert!(is_available(&existing, Location::Garden, at(10, 0), at(11, 0), None));
    }

    #[test]
    fn excluded_reservation_is_skipped() {
        let existing =
            vec![reservation(Location::Garden, at(10, 0), at(11, 0), ReservationStatus::Confirmed)];
        let id = existing[0].id;
        assert!(is_available(&existing, Location::Garden, at(10, 0), at(11, 0), Some(id)));
        assert!(!is_available(&existing, Location::Garden, at(10, 0), at(11, 0), Some(Uuid::new_v4())));
    }

    #[test]
    fn availability_is_symmetric_under_reflection() {
        // Checking the candidate against a store holding R must agree with
        // checking R's window against a store holding only the candidate.
        let windows =
            [(at(10, 0), at(11, 0)), (at(10, 30), at(11, 30)), (at(11, 0), at(12, 0)), (at(9, 0), at(13, 0))];

        for (r_start, r_end) in windows {
            for (c_start, c_end) in windows {
                let store_r = vec![reservation(
                    Location::Garden,
                    r_start,
                    r_end,
                    ReservationStatus::Confirmed,
                )];
                let store_c = vec![reservation(
                    Location::Garden,
                    c_start,
                    c_end,
                    ReservationStatus::Confirmed,
                )];

                assert_eq!(
                    is_available(&store_r, Location::Garden, c_start, c_end, None),
                    is_available(&store_c, Location::Garden, r_start, r_end, None),
                );
            }
        }
    }
}
