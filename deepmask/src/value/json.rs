//! `serde_json` and `serde` support for value trees.
//!
//! JSON documents convert losslessly into [`Value`]. Object key order is kept
//! (serde_json is built with `preserve_order`). Converting back renders
//! date-times as RFC 3339 strings, since JSON has no date type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::{Record, Scalar, Value};

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::NULL,
            JsonValue::Bool(flag) => Value::Scalar(Scalar::Bool(flag)),
            JsonValue::Number(number) => Value::Scalar(Scalar::Number(number)),
            JsonValue::String(text) => Value::Scalar(Scalar::String(text)),
            JsonValue::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Record(map.into()),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(scalar) => scalar.into(),
            Value::Sequence(items) => JsonValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Record(record) => JsonValue::Object(
                record
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for JsonValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => JsonValue::Null,
            Scalar::Bool(flag) => JsonValue::Bool(flag),
            Scalar::Number(number) => JsonValue::Number(number),
            Scalar::String(text) => JsonValue::String(text),
            #[cfg(feature = "chrono")]
            Scalar::DateTime(datetime) => JsonValue::String(datetime.to_rfc3339()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Record(record) => serializer.collect_map(record.iter()),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(flag) => serializer.serialize_bool(*flag),
            Scalar::Number(number) => number.serialize(serializer),
            Scalar::String(text) => serializer.serialize_str(text),
            #[cfg(feature = "chrono")]
            Scalar::DateTime(datetime) => serializer.serialize_str(&datetime.to_rfc3339()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Map<String, JsonValue>> for Record {
    fn from(map: serde_json::Map<String, JsonValue>) -> Self {
        // Object keys are unique already.
        Record::from_unique_entries(
            map.into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        )
    }
}
