//! Adapters for emitting masked values through `slog`.
//!
//! This module connects [`Masker`] with `slog` by providing a `slog::Value`
//! implementation that serializes masked output as structured JSON via `slog`'s
//! nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the masked tree, never the original
//!   value.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which keys are sensitive.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::masking::Masker;

/// A masked JSON value ready to be logged.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedJson(JsonValue);

impl MaskedJson {
    /// Returns the masked JSON.
    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    /// Consumes the wrapper, returning the masked JSON.
    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.0.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Extension trait for ergonomic slog logging of masked values as JSON.
///
/// ## Example
/// ```ignore
/// use deepmask::slog::SlogMaskedExt;
///
/// info!(logger, "event"; "payload" => payload.slog_masked_json(&masker));
/// ```
pub trait SlogMaskedExt: Serialize {
    /// Masks `self` and returns a `slog::Value` that serializes as structured JSON.
    ///
    /// If `self` cannot be converted into JSON, the returned value stores a JSON
    /// string with the message `"Failed to serialize value"`.
    fn slog_masked_json(&self, masker: &Masker) -> MaskedJson {
        let json = masker.mask_serialize(self).map_or_else(
            |err| JsonValue::String(format!("Failed to serialize value: {err}")),
            JsonValue::from,
        );
        MaskedJson(json)
    }
}

impl<T> SlogMaskedExt for T where T: Serialize + ?Sized {}
