// src/error.rs

use thiserror::Error;

/// Anything that stops a store read from producing rows we can map.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A column held a value outside its documented vocabulary.
    #[error("unexpected {field} value {value:?}")]
    Schema { field: &'static str, value: String },
}

impl StoreError {
    pub fn schema(field: &'static str, value: impl Into<String>) -> Self {
        StoreError::Schema { field, value: value.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_field_and_value() {
        let err = StoreError::schema("driver status", "parked");
        assert_eq!(err.to_string(), r#"unexpected driver status value "parked""#);
    }

    #[test]
    fn sqlx_errors_convert() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(err.to_string().starts_with("database error:"));
    }
}
