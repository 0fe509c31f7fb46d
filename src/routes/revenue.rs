// src/routes/revenue.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::WeeklyRevenuePoint, AppState};
use super::or_fallback;

/// Revenue per weekday, Mon..Sun.
pub async fn get_weekly(State(state): State<AppState>) -> Json<Vec<WeeklyRevenuePoint>> {
    let result = state.store.weekly_revenue().await.and_then(mapping::weekly_revenue_from_rows);
    or_fallback("/api/revenue/weekly", result, fallback::weekly_revenue)
}
