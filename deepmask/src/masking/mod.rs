//! Masking traversal and entrypoints.
//!
//! This module provides the machinery for applying masks:
//!
//! - **`primitive`**: masks one scalar (percentage, direction, date/time rule)
//! - **`query`**: masks sensitive query parameters inside URL-shaped strings
//! - **`deep`**: masks every leaf of a subtree whose key matched
//! - this module: [`SensitiveKeys`], the [`Masker`] tree walker and the
//!   [`find_and_mask`] entrypoints
//!
//! Query masking runs before key matching. When a sensitive key holds a URL
//! whose query also carries a sensitive parameter, the parameter is masked
//! first and the rewritten string is then masked as a whole.

mod deep;
mod primitive;
mod query;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::trace;

pub use deep::mask_all;
pub use primitive::mask_primitive;
pub use query::mask_query;

use crate::{
    error::MaskError,
    options::{MaskConfig, MaskOptions},
    value::{Key, Value},
};

// =============================================================================
// SensitiveKeys - The names whose values get masked
// =============================================================================

/// Property and query-parameter names whose values are masked.
///
/// Matching is exact and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SensitiveKeys {
    keys: HashSet<String>,
}

impl SensitiveKeys {
    /// Builds a key set from any iterable of names. Duplicates collapse.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().collect()
    }

    /// Returns true when `key` is sensitive.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true when nothing is sensitive.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates the keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SensitiveKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Masker - Resolved configuration plus key set
// =============================================================================

/// A reusable masking walk: a validated configuration and a key set.
///
/// Building a `Masker` validates the options once; masking itself cannot fail.
/// A `Masker` is `Send + Sync` and can be shared between threads.
///
/// ```rust
/// use deepmask::{MaskOptions, Masker, Value};
/// use serde_json::json;
///
/// let masker = Masker::new(["b"], MaskOptions::new())?;
/// let masked = masker.mask(Value::from(json!({"a": 1, "b": "aaaaaa"})));
/// assert_eq!(serde_json::Value::from(masked), json!({"a": 1, "b": "*****a"}));
/// # Ok::<(), deepmask::MaskError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Masker {
    keys: SensitiveKeys,
    config: MaskConfig,
}

impl Masker {
    /// Resolves `options` and captures `keys`.
    pub fn new<I, S>(keys: I, options: MaskOptions) -> Result<Self, MaskError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::with_config(SensitiveKeys::new(keys), options.resolve()?))
    }

    /// Builds a masker from an already resolved configuration.
    pub fn with_config(keys: SensitiveKeys, config: MaskConfig) -> Self {
        Self { keys, config }
    }

    /// The sensitive key set.
    pub fn keys(&self) -> &SensitiveKeys {
        &self.keys
    }

    /// The resolved configuration.
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Masks a value tree.
    ///
    /// - A URL string with sensitive query parameters comes back with those
    ///   parameters masked.
    /// - Any other maskable value at the top level comes back unchanged: it has
    ///   no key to match.
    /// - Records and sequences are walked. Entries under a sensitive key are
    ///   masked in full; other containers are walked recursively.
    #[must_use]
    pub fn mask(&self, source: Value) -> Value {
        if let Some(masked) = mask_query(&source, &self.keys, &self.config) {
            return Value::string(masked);
        }
        if self.config.is_maskable(&source) {
            return source;
        }

        match source {
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| self.mask_entry(Key::Index(index), item))
                .collect(),
            Value::Record(record) => Value::Record(
                record.map_values(|name, value| self.mask_entry(Key::Name(name), value)),
            ),
            scalar @ Value::Scalar(_) => scalar,
        }
    }

    /// Masks a JSON document.
    #[must_use]
    pub fn mask_json(&self, source: JsonValue) -> JsonValue {
        self.mask(source.into()).into()
    }

    /// Serializes `source` into a value tree and masks it.
    ///
    /// Fails only when `source` cannot be represented as JSON (for example a
    /// map with non-string keys).
    pub fn mask_serialize<T>(&self, source: &T) -> Result<Value, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(source).map(|json| self.mask(json.into()))
    }

    fn mask_entry(&self, key: Key<'_>, value: Value) -> Value {
        let value = match mask_query(&value, &self.keys, &self.config) {
            Some(masked) => Value::string(masked),
            None => value,
        };

        if key.as_name().is_some_and(|name| self.keys.contains(name)) {
            trace!(%key, "masking sensitive entry");
            return mask_all(value, key, &self.config);
        }
        if value.is_container() {
            return self.mask(value);
        }
        value
    }
}

// =============================================================================
// Entrypoints
// =============================================================================

/// Masks `source`, treating `keys` as sensitive.
///
/// Options are validated before anything is masked.
///
/// ```rust
/// use deepmask::{MaskOptions, Value, find_and_mask};
/// use serde_json::json;
///
/// let source = Value::from(json!({"e": "blahblah?c=maskThis", "c": "xx"}));
/// let masked = find_and_mask(source, ["c"], MaskOptions::new())?;
/// assert_eq!(
///     serde_json::Value::from(masked),
///     json!({"e": "blahblah?c=******is", "c": "**"})
/// );
/// # Ok::<(), deepmask::MaskError>(())
/// ```
pub fn find_and_mask<I, S>(source: Value, keys: I, options: MaskOptions) -> Result<Value, MaskError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(Masker::new(keys, options)?.mask(source))
}

/// Masks a JSON document with loosely-typed JSON options.
///
/// See [`MaskOptions::from_json`] for the accepted option shapes.
pub fn find_and_mask_json<I, S>(
    source: JsonValue,
    keys: I,
    options: &JsonValue,
) -> Result<JsonValue, MaskError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let options = MaskOptions::from_json(options)?;
    Ok(Masker::new(keys, options)?.mask_json(source))
}
