//! Reservation business rules and lifecycle orchestration

pub mod availability;
pub mod ports;
pub mod quantize;
pub mod service;

pub use availability::{is_available, overlaps};
pub use quantize::quantize;
pub use service::{ReservationOutcome, ReservationService, SyncOutcome};
