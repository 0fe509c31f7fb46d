// src/routes/health.rs

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResp {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The one route that reports store failures as a 5xx.
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<HealthResp>, (StatusCode, Json<HealthResp>)> {
    match state.store.ping().await {
        Ok(ok) => Ok(Json(HealthResp { ok, error: None })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResp { ok: false, error: Some(e.to_string()) }),
            ))
        }
    }
}
