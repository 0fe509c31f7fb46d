// src/app.rs

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::DashboardStore;
use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DashboardStore>,
}

impl AppState {
    pub fn new(store: impl DashboardStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}

pub fn create_app(state: AppState) -> Router {
    // The dashboard is served from another origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/metrics", get(routes::metrics::get_metrics))
        .route("/api/earnings/overview", get(routes::earnings::get_overview))
        .route("/api/drivers", get(routes::drivers::list_drivers))
        .route("/api/rides/live", get(routes::rides::list_live_rides))
        .route("/api/locations/popular", get(routes::locations::list_popular))
        .route("/api/revenue/weekly", get(routes::revenue::get_weekly))
        .route("/api/analytics/hourly", get(routes::analytics::get_hourly))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
