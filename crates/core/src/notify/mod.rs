//! Notification port
//!
//! User-facing notifications for lifecycle events. Delivery is best-effort:
//! the lifecycle manager logs failures and never lets them affect the
//! reservation operation.

use async_trait::async_trait;
use reserva_domain::{Reservation, Result};

/// Trait for delivering reservation lifecycle notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A reservation was created.
    async fn reservation_confirmed(&self, reservation: &Reservation) -> Result<()>;

    /// A reservation's fields changed.
    async fn reservation_changed(&self, reservation: &Reservation) -> Result<()>;

    /// A reservation was cancelled or deleted.
    async fn reservation_cancelled(&self, reservation: &Reservation) -> Result<()>;
}
