//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `slog_masked_json()` produces correctly masked JSON values
//! - The `slog::Value` implementation works with slog's serialization API
//! - Serialization failures are logged as placeholders, never as raw values

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use deepmask::{MaskOptions, Masker, Value, slog::SlogMaskedExt};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Other,
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.into()));
        Ok(())
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Other);
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

fn capture<V: slog::Value>(value: &V, key: &'static str) -> Option<CapturedValue> {
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(value, key, &mut serializer);
    serializer.get(key)
}

mod slog_masked_json {
    use super::*;

    #[test]
    fn masks_a_serializable_struct() {
        #[derive(Serialize)]
        struct Login {
            username: String,
            password: String,
            callback: String,
        }

        let login = Login {
            username: "alice".into(),
            password: "super_secret_password".into(),
            callback: "/done?token=abcdefghij".into(),
        };
        let masker = Masker::new(["password", "token"], MaskOptions::new()).unwrap();

        match capture(&login.slog_masked_json(&masker), "login") {
            Some(CapturedValue::Serde(json)) => {
                assert_eq!(json["username"], "alice");
                assert_eq!(json["password"], "*****************word");
                assert_eq!(json["callback"], "/done?token=********ij");
            }
            other => panic!("Expected Serde value for 'login' key, got {other:?}"),
        }
    }

    #[test]
    fn masks_nested_json_documents() {
        let payload = json!({"users": [{"name": "a", "ssn": "123-45-6789"}]});
        let masker = Masker::new(["ssn"], MaskOptions::new().mask_from_right(true)).unwrap();

        assert_eq!(
            capture(&payload.slog_masked_json(&masker), "payload"),
            Some(CapturedValue::Serde(
                json!({"users": [{"name": "a", "ssn": "12*********"}]})
            ))
        );
    }

    #[test]
    fn masks_value_trees() {
        let masker = Masker::new(["pin"], MaskOptions::new()).unwrap();
        let value = Value::from(json!({"pin": 1234}));

        let masked = value.slog_masked_json(&masker);
        assert_eq!(masked.value(), &json!({"pin": "***4"}));
        assert_eq!(
            capture(&masked, "v"),
            Some(CapturedValue::Serde(json!({"pin": "***4"})))
        );
    }

    #[test]
    fn unserializable_values_log_a_placeholder() {
        let mut payload = HashMap::new();
        payload.insert((1, 2), "secret");
        let masker = Masker::new(["secret"], MaskOptions::new()).unwrap();

        match capture(&payload.slog_masked_json(&masker), "payload") {
            Some(CapturedValue::Serde(JsonValue::String(text))) => {
                assert!(text.starts_with("Failed to serialize value"));
            }
            other => panic!("Expected placeholder string, got {other:?}"),
        }
    }
}
