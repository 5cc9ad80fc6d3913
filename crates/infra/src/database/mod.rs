//! SQLite-backed implementations of the persistence ports

pub mod manager;
pub mod reservation_repository;
pub mod user_repository;

pub use manager::DbManager;
pub use reservation_repository::SqliteReservationRepository;
pub use user_repository::SqliteUserRepository;
