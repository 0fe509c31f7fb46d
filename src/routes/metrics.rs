// src/routes/metrics.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::MetricsSnapshot, AppState};
use super::or_fallback;

pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    let result = state.store.metrics().await.map(mapping::metrics_from_rows);
    or_fallback("/api/metrics", result, fallback::metrics)
}
