// src/models/number.rs

use serde::Serializer;

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes whole numbers without a fractional part (`250`, not `250.0`) and
/// non-finite values as `0`, so no numeric field ever serializes to `null`.
pub fn compact<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let v = if value.is_finite() { *value } else { 0.0 };
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(v as i64)
    } else {
        serializer.serialize_f64(v)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Wrap(#[serde(serialize_with = "super::compact")] f64);

    #[test]
    fn whole_numbers_drop_the_fraction() {
        assert_eq!(serde_json::to_value(Wrap(4589.0)).unwrap(), json!(4589));
        assert_eq!(serde_json::to_value(Wrap(-3.0)).unwrap(), json!(-3));
        assert_eq!(serde_json::to_string(&Wrap(250.0)).unwrap(), "250");
    }

    #[test]
    fn fractions_are_kept() {
        assert_eq!(serde_json::to_value(Wrap(94.2)).unwrap(), json!(94.2));
        assert_eq!(serde_json::to_value(Wrap(-2.1)).unwrap(), json!(-2.1));
    }

    #[test]
    fn non_finite_becomes_zero() {
        assert_eq!(serde_json::to_string(&Wrap(f64::NAN)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Wrap(f64::INFINITY)).unwrap(), "0");
    }
}
