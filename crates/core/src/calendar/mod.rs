//! Calendar synchronization

pub mod ports;
pub mod sync;

pub use ports::CalendarApi;
pub use sync::CalendarSyncService;
