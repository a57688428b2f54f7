use serde_json::{Map, Value};

/// Generic envelope keys, tried after the resource's own plural key.
const ENVELOPE_KEYS: &[&str] = &["data", "items"];

/// A server payload classified by shape.
///
/// List endpoints wrap their items inconsistently (`{"data": [...]}`,
/// `{"assistants": [...]}`, a bare array) and show endpoints return plain
/// objects. Classification happens once; every stage downstream matches on the
/// variant instead of probing fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    List(Vec<Value>),
    Envelope {
        key: String,
        items: Vec<Value>,
        meta: Map<String, Value>,
    },
    Single(Map<String, Value>),
    Scalar(Value),
}

impl Payload {
    pub fn classify(value: Value, plural_key: Option<&str>) -> Self {
        match value {
            Value::Array(items) => Payload::List(items),
            Value::Object(mut map) => {
                let key = plural_key
                    .into_iter()
                    .chain(ENVELOPE_KEYS.iter().copied())
                    .find(|k| matches!(map.get(*k), Some(Value::Array(_))))
                    .map(str::to_string);
                match key {
                    Some(key) => {
                        let items = match map.shift_remove(&key) {
                            Some(Value::Array(items)) => items,
                            _ => Vec::new(),
                        };
                        Payload::Envelope {
                            key,
                            items,
                            meta: map,
                        }
                    }
                    None => Payload::Single(map),
                }
            }
            other => Payload::Scalar(other),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Payload::List(_) | Payload::Envelope { .. })
    }

    /// Envelope metadata (`has_more`, `last_id`, ...); empty for other shapes.
    pub fn meta(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Envelope { meta, .. } => Some(meta),
            _ => None,
        }
    }

    /// Canonical item list. A single object or scalar becomes a one-item list;
    /// `null` becomes an empty one.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Payload::List(items) | Payload::Envelope { items, .. } => items,
            Payload::Single(map) => vec![Value::Object(map)],
            Payload::Scalar(Value::Null) => Vec::new(),
            Payload::Scalar(other) => vec![other],
        }
    }
}
