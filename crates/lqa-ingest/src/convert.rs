//! JSON to attribute value conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lqa_model::{FieldType, RecordId, Value};
use serde_json::Value as Json;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Convert a JSON attribute to a [`Value`] for a field of the given type.
///
/// `None` as the field type means the field is not declared; the value is
/// then taken as-is. Returns `None` when the value cannot be read as the
/// field's type.
pub(crate) fn to_value(json: &Json, field_type: Option<FieldType>) -> Option<Value> {
    if json.is_null() {
        return Some(Value::Null);
    }
    match field_type {
        None => untyped(json),
        Some(FieldType::Text) => match json {
            Json::String(text) => Some(Value::Text(text.clone())),
            Json::Number(number) => Some(Value::Text(number.to_string())),
            _ => None,
        },
        Some(FieldType::Integer) => match json {
            Json::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(integral))
                .map(Value::Integer),
            Json::String(text) => text.trim().parse::<i64>().ok().map(Value::Integer),
            _ => None,
        },
        Some(FieldType::Float) => match json {
            Json::Number(number) => number.as_f64().map(Value::Float),
            Json::String(text) => text.trim().parse::<f64>().ok().map(Value::Float),
            _ => None,
        },
        Some(FieldType::Date) => match json {
            Json::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|ms| ms.round() as i64))
                .and_then(from_epoch_millis)
                .map(Value::Date),
            Json::String(text) => parse_datetime(text).map(Value::Date),
            _ => None,
        },
    }
}

fn untyped(json: &Json) -> Option<Value> {
    match json {
        Json::String(text) => Some(Value::Text(text.clone())),
        Json::Number(number) => number
            .as_i64()
            .map(Value::Integer)
            .or_else(|| number.as_f64().map(Value::Float)),
        _ => None,
    }
}

/// Read an object id. Integral numbers and non-empty strings are accepted.
pub(crate) fn to_record_id(json: &Json) -> Option<RecordId> {
    match json {
        Json::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral))
            .map(RecordId::Integer),
        Json::String(text) if !text.trim().is_empty() => Some(RecordId::Text(text.clone())),
        _ => None,
    }
}

fn integral(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64)
        .then_some(value as i64)
}

fn from_epoch_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Whether a feature's geometry carries a shape.
///
/// Null, `{}`, and the empty forms of point, multipoint, polyline and
/// polygon geometries all count as missing.
pub(crate) fn geometry_present(geometry: Option<&Json>) -> bool {
    let Some(Json::Object(map)) = geometry else {
        return false;
    };

    if let Some(x) = map.get("x") {
        return x.as_f64().is_some_and(|x| !x.is_nan());
    }
    for key in ["points", "paths", "rings"] {
        if let Some(parts) = map.get(key) {
            return parts.as_array().is_some_and(|parts| {
                parts
                    .iter()
                    .any(|part| part.as_array().is_some_and(|coords| !coords.is_empty()))
            });
        }
    }
    if let Some(xmin) = map.get("xmin") {
        return xmin.as_f64().is_some_and(|x| !x.is_nan());
    }

    // Unknown geometry encodings count as present when they carry anything.
    map.keys().any(|key| key != "spatialReference")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_values() {
        assert_eq!(
            to_value(&json!("Main St"), Some(FieldType::Text)),
            Some(Value::from("Main St"))
        );
        // Empty strings are values, not nulls.
        assert_eq!(
            to_value(&json!(""), Some(FieldType::Text)),
            Some(Value::from(""))
        );
        assert_eq!(to_value(&json!({"a": 1}), Some(FieldType::Text)), None);
    }

    #[test]
    fn test_integer_values() {
        assert_eq!(
            to_value(&json!(7), Some(FieldType::Integer)),
            Some(Value::Integer(7))
        );
        assert_eq!(
            to_value(&json!(7.0), Some(FieldType::Integer)),
            Some(Value::Integer(7))
        );
        assert_eq!(to_value(&json!(7.5), Some(FieldType::Integer)), None);
        assert_eq!(to_value(&json!("seven"), Some(FieldType::Integer)), None);
    }

    #[test]
    fn test_date_values() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            to_value(&json!(1_705_276_800_000_i64), Some(FieldType::Date)),
            Some(Value::Date(expected))
        );
        assert_eq!(
            to_value(&json!("2024-01-15"), Some(FieldType::Date)),
            Some(Value::Date(expected))
        );
        assert_eq!(
            to_value(&json!("2024-01-15T00:00:00Z"), Some(FieldType::Date)),
            Some(Value::Date(expected))
        );
        assert_eq!(to_value(&json!("soon"), Some(FieldType::Date)), None);
    }

    #[test]
    fn test_null_passes_through() {
        for field_type in [None, Some(FieldType::Date), Some(FieldType::Integer)] {
            assert_eq!(to_value(&Json::Null, field_type), Some(Value::Null));
        }
    }

    #[test]
    fn test_record_id() {
        assert_eq!(to_record_id(&json!(12)), Some(RecordId::Integer(12)));
        assert_eq!(to_record_id(&json!("{ABC}")), Some(RecordId::from("{ABC}")));
        assert_eq!(to_record_id(&json!(1.5)), None);
        assert_eq!(to_record_id(&json!("")), None);
    }

    #[test]
    fn test_geometry_present() {
        assert!(!geometry_present(None));
        assert!(!geometry_present(Some(&Json::Null)));
        assert!(!geometry_present(Some(&json!({}))));
        assert!(!geometry_present(Some(&json!({"x": null, "y": null}))));
        assert!(!geometry_present(Some(&json!({"x": "NaN", "y": "NaN"}))));
        assert!(!geometry_present(Some(&json!({"paths": []}))));
        assert!(!geometry_present(Some(&json!({"rings": [[]]}))));
        assert!(geometry_present(Some(&json!({"x": 1.0, "y": 2.0}))));
        assert!(geometry_present(Some(&json!({"paths": [[[0, 0], [1, 1]]]}))));
    }
}
