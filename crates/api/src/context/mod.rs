//! Application context - dependency injection container

use std::sync::Arc;

use reserva_core::{
    CalendarSyncService, ReservationService, SignInService, TokenManager, UserRepository,
};
use reserva_domain::{Config, Result};
use reserva_infra::database::{DbManager, SqliteReservationRepository, SqliteUserRepository};
use reserva_infra::{GoogleCalendarClient, GoogleOAuthClient, TracingNotifier};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub users: Arc<dyn UserRepository>,
    pub reservations: Arc<ReservationService>,
    pub calendar_sync: Arc<CalendarSyncService>,
    pub sign_in: Arc<SignInService>,
}

impl AppContext {
    /// Wire the full dependency graph from configuration.
    pub fn initialize(config: Config) -> Result<Arc<Self>> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let user_repo: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(db.clone()));
        let reservation_repo = Arc::new(SqliteReservationRepository::new(db.clone()));

        let oauth = Arc::new(GoogleOAuthClient::new(&config.google)?);
        let token_manager = Arc::new(TokenManager::new(oauth.clone(), user_repo.clone()));

        let calendar_api = Arc::new(GoogleCalendarClient::new()?);
        let sync = Arc::new(CalendarSyncService::new(
            calendar_api,
            token_manager,
            reservation_repo.clone(),
            config.google.calendar_id.clone(),
            config.google.timezone.clone(),
        ));

        let reservations = Arc::new(ReservationService::new(
            reservation_repo,
            user_repo.clone(),
            sync.clone(),
            Arc::new(TracingNotifier::new()),
        ));

        let sign_in = Arc::new(SignInService::new(
            oauth,
            user_repo.clone(),
            config.google.allowed_domain.clone(),
        ));

        info!(db_path = %config.database.path, "application context initialised");

        Ok(Arc::new(Self {
            config,
            db,
            users: user_repo,
            reservations,
            calendar_sync: sync,
            sign_in,
        }))
    }
}
