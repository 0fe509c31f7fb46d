// src/main.rs

use tokio::net::TcpListener;
use tracing::info;

use rootcabs_api::{config::Config, create_app, db, db::PgStore, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();
    rootcabs_api::init_tracing();

    let config = Config::from_env()?;

    let pool = db::connect(&config)?;
    let state = AppState::new(PgStore::new(pool, config.schema.clone()));
    let app = create_app(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        // without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
