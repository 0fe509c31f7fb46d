// src/routes/earnings.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::EarningsSummary, AppState};
use super::or_fallback;

pub async fn get_overview(State(state): State<AppState>) -> Json<EarningsSummary> {
    let result = state.store.earnings().await.map(mapping::earnings_from_rows);
    or_fallback("/api/earnings/overview", result, fallback::earnings)
}
