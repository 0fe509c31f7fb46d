// src/routes/analytics.rs

use axum::{extract::State, Json};

use crate::{fallback, mapping, models::HourlyDemandPoint, AppState};
use super::or_fallback;

/// Ride demand per hour of the working day, in clock order.
pub async fn get_hourly(State(state): State<AppState>) -> Json<Vec<HourlyDemandPoint>> {
    let result = state.store.hourly_demand().await.and_then(mapping::hourly_demand_from_rows);
    or_fallback("/api/analytics/hourly", result, fallback::hourly_demand)
}
