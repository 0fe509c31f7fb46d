// src/routes/drivers.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::Driver, AppState};
use super::or_fallback;

/// Top drivers by rides completed, at most 100.
pub async fn list_drivers(State(state): State<AppState>) -> Json<Vec<Driver>> {
    let result = state.store.drivers().await.and_then(mapping::drivers_from_rows);
    or_fallback("/api/drivers", result, fallback::drivers)
}
