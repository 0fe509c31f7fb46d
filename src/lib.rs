// src/lib.rs

pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod fallback;
pub mod mapping;
pub mod models;
pub mod routes;
pub mod search;

pub use app::{create_app, AppState};

/// Installs the fmt subscriber; `RUST_LOG` overrides the default `info`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
