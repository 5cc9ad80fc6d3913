//! Recording mock for the `Notifier` port.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reserva_core::Notifier;
use reserva_domain::{ReservaError, Reservation, Result};
use uuid::Uuid;

/// What kind of notification was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Confirmed,
    Changed,
    Cancelled,
}

/// Notifier that records deliveries, optionally failing every call.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    pub deliveries: Arc<Mutex<Vec<(NotificationKind, Uuid)>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    pub fn deliveries(&self) -> Vec<(NotificationKind, Uuid)> {
        self.deliveries.lock().unwrap().clone()
    }

    fn record(&self, kind: NotificationKind, reservation: &Reservation) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(ReservaError::Internal("notifier offline".into()));
        }
        self.deliveries.lock().unwrap().push((kind, reservation.id));
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn reservation_confirmed(&self, reservation: &Reservation) -> Result<()> {
        self.record(NotificationKind::Confirmed, reservation)
    }

    async fn reservation_changed(&self, reservation: &Reservation) -> Result<()> {
        self.record(NotificationKind::Changed, reservation)
    }

    async fn reservation_cancelled(&self, reservation: &Reservation) -> Result<()> {
        self.record(NotificationKind::Cancelled, reservation)
    }
}
