use axum::Json;
use tracing::error;

use crate::error::StoreError;

pub mod analytics;
pub mod drivers;
pub mod earnings;
pub mod health;
pub mod locations;
pub mod metrics;
pub mod revenue;
pub mod rides;

// Common fallback mapper: a failed read is logged and answered with the
// resource's static payload, still as 200.
pub fn or_fallback<T>(route: &'static str, result: Result<T, StoreError>, fallback: fn() -> T) -> Json<T> {
    match result {
        Ok(body) => Json(body),
        Err(e) => {
            error!(route, error = %e, "query failed, serving fallback");
            Json(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_passes_through() {
        let Json(v) = or_fallback("/t", Ok(vec![1, 2]), Vec::new);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn error_uses_fallback() {
        let Json(v) = or_fallback("/t", Err(StoreError::schema("x", "y")), || vec![9]);
        assert_eq!(v, vec![9]);
    }
}
