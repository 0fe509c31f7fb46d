// src/routes/locations.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::PopularLocation, AppState};
use super::or_fallback;

pub async fn list_popular(State(state): State<AppState>) -> Json<Vec<PopularLocation>> {
    let result = state.store.popular_locations().await.map(mapping::locations_from_rows);
    or_fallback("/api/locations/popular", result, fallback::popular_locations)
}
