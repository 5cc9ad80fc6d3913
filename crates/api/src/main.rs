//! Reserva server entrypoint

use reserva_api::context::AppContext;
use reserva_api::{build_router, logging};
use reserva_domain::{ReservaError, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    logging::init_tracing();

    let config = reserva_infra::config::load()?;
    let bind_addr = config.server.bind_addr.clone();

    let context = AppContext::initialize(config)?;
    let router = build_router(context);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ReservaError::Config(format!("failed to bind {bind_addr}: {e}")))?;

    info!(%bind_addr, "reserva server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ReservaError::Internal(format!("server error: {e}")))?;

    Ok(())
}
