//! Tracing-backed notifier
//!
//! Emits structured log events for reservation lifecycle notifications. A
//! real delivery channel (email, chat webhook) would slot in behind the same
//! port.

use async_trait::async_trait;
use reserva_core::Notifier;
use reserva_domain::{Reservation, Result};
use tracing::info;

/// Notifier that records lifecycle events in the application log.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn reservation_confirmed(&self, reservation: &Reservation) -> Result<()> {
        info!(
            reservation_id = %reservation.id,
            location = %reservation.location,
            start = %reservation.start,
            "notification: reservation confirmed"
        );
        Ok(())
    }

    async fn reservation_changed(&self, reservation: &Reservation) -> Result<()> {
        info!(
            reservation_id = %reservation.id,
            location = %reservation.location,
            start = %reservation.start,
            "notification: reservation changed"
        );
        Ok(())
    }

    async fn reservation_cancelled(&self, reservation: &Reservation) -> Result<()> {
        info!(
            reservation_id = %reservation.id,
            location = %reservation.location,
            "notification: reservation cancelled"
        );
        Ok(())
    }
}
