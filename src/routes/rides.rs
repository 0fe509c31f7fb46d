// src/routes/rides.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::LiveRide, AppState};
use super::or_fallback;

/// Rides waiting for pickup or en route, by id.
pub async fn list_live_rides(State(state): State<AppState>) -> Json<Vec<LiveRide>> {
    let result = state.store.live_rides().await.and_then(mapping::live_rides_from_rows);
    or_fallback("/api/rides/live", result, fallback::live_rides)
}
