//! # Reserva Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Availability checking and time quantization rules
//! - Reservation lifecycle orchestration
//! - OAuth token management and calendar sync services
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `reserva-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod auth;
pub mod calendar;
pub mod notify;
pub mod reservations;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{GoogleTokenClient, OAuthProfile};
pub use auth::{SignInService, TokenManager};
pub use calendar::ports::CalendarApi;
pub use calendar::CalendarSyncService;
pub use notify::Notifier;
pub use reservations::availability::{is_available, overlaps};
pub use reservations::ports::{ReservationRepository, UserRepository};
pub use reservations::quantize::quantize;
pub use reservations::service::{ReservationOutcome, ReservationService, SyncOutcome};
