//! Adapters for emitting masked values through `tracing`.
//!
//! [`TracingMaskedExt`] masks a serializable payload and wraps the result as a
//! display value rendering compact JSON. It works with any tracing subscriber;
//! the structure is flattened into the JSON text.
//!
//! # Example
//!
//! ```ignore
//! use deepmask::tracing::TracingMaskedExt;
//!
//! let masker = Masker::new(["password", "token"], MaskOptions::new())?;
//! tracing::info!(request = %payload.tracing_masked(&masker), "received request");
//! ```

use serde::Serialize;
use tracing::field::{DisplayValue, display};

use crate::masking::Masker;

/// Extension trait for logging masked values as display strings.
pub trait TracingMaskedExt {
    /// Masks the value with `masker` and wraps it as a `tracing` display value.
    ///
    /// If the value cannot be serialized, the display value holds an error
    /// message instead. The unmasked value is never rendered.
    fn tracing_masked(&self, masker: &Masker) -> DisplayValue<String>;
}

impl<T> TracingMaskedExt for T
where
    T: Serialize + ?Sized,
{
    fn tracing_masked(&self, masker: &Masker) -> DisplayValue<String> {
        let text = match masker.mask_serialize(self) {
            Ok(masked) => masked.to_string(),
            Err(err) => format!("Failed to serialize value: {err}"),
        };
        display(text)
    }
}
