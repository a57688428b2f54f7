use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// 9999-12-31T23:59:59Z; anything larger is not a plausible epoch second.
const MAX_EPOCH_SECS: f64 = 253_402_300_799.0;

pub fn is_timestamp_field(key: &str) -> bool {
    key.ends_with("_at")
}

/// Render epoch seconds as `YYYY-MM-DDTHH:MM:SSZ`, or `None` if implausible.
pub fn epoch_to_iso(value: &Value) -> Option<String> {
    let secs = match value {
        Value::Number(n) => n.as_i64().map(|s| s as f64).or_else(|| n.as_f64())?,
        _ => return None,
    };
    if !secs.is_finite() || !(0.0..=MAX_EPOCH_SECS).contains(&secs) {
        return None;
    }
    let dt = DateTime::from_timestamp(secs.trunc() as i64, 0)?;
    Some(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Replace every numeric `*_at` field, at any depth, with an ISO-8601 string.
pub fn convert_timestamps(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    let v = if is_timestamp_field(&key) {
                        match epoch_to_iso(&v) {
                            Some(iso) => Value::String(iso),
                            None => convert_timestamps(v),
                        }
                    } else {
                        convert_timestamps(v)
                    };
                    (key, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(convert_timestamps).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_epoch_seconds() {
        let out = convert_timestamps(json!({"id": "thread_1", "created_at": 1700000000}));
        assert_eq!(out["created_at"], json!("2023-11-14T22:13:20Z"));
        assert_eq!(out["id"], json!("thread_1"));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let once = convert_timestamps(json!({"created_at": 1700000000}));
        let twice = convert_timestamps(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn recurses_into_nested_objects_and_arrays() {
        let out = convert_timestamps(json!({
            "last_error": null,
            "file_counts": {"total": 1},
            "steps": [{"id": "s1", "completed_at": 0, "expires_at": null}],
            "meta": {"inner": {"failed_at": 1704067200.75}}
        }));
        assert_eq!(out["steps"][0]["completed_at"], json!("1970-01-01T00:00:00Z"));
        assert_eq!(out["steps"][0]["expires_at"], Value::Null);
        assert_eq!(out["meta"]["inner"]["failed_at"], json!("2024-01-01T00:00:00Z"));
        assert_eq!(out["file_counts"]["total"], json!(1));
    }

    #[test]
    fn leaves_non_matching_fields_alone() {
        let out = convert_timestamps(json!({
            "bytes": 1700000000,
            "created_at": "yesterday",
            "started_at": -5,
            "cancelled_at": 1e15,
            "format": "at"
        }));
        assert_eq!(out["bytes"], json!(1700000000));
        assert_eq!(out["created_at"], json!("yesterday"));
        assert_eq!(out["started_at"], json!(-5));
        assert_eq!(out["cancelled_at"], json!(1e15));
    }

    #[test]
    fn preserves_key_order() {
        let out = convert_timestamps(json!({"z": 1, "created_at": 1700000000, "a": 2}));
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "created_at", "a"]);
    }
}
