//! The value tree that masking walks.
//!
//! A [`Value`] is a closed set of shapes:
//!
//! - **Scalars** ([`Scalar`]): null, booleans, numbers, strings and (with the
//!   `chrono` feature) date-times. These are the leaves masking rewrites.
//! - **Sequences**: ordered lists of values.
//! - **Records** ([`Record`]): insertion-ordered maps from unique string keys to
//!   values.
//!
//! Masking only ever replaces scalar content. Container kinds, record keys, key
//! order and sequence lengths always survive unchanged.
//!
//! Conversions to and from `serde_json::Value` live in `json`.

mod json;
mod record;

use std::{borrow::Cow, fmt};

#[cfg(feature = "chrono")]
use chrono::{DateTime, FixedOffset};
use serde_json::Number;

pub use record::Record;

/// A node of a value tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Record(Record),
}

/// A leaf value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    #[cfg(feature = "chrono")]
    DateTime(DateTime<FixedOffset>),
}

impl Scalar {
    /// Returns the text a scalar is masked from.
    ///
    /// Null renders as `"null"`, numbers use their JSON rendering and
    /// date-times use RFC 3339.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null => Cow::Borrowed("null"),
            Scalar::Bool(true) => Cow::Borrowed("true"),
            Scalar::Bool(false) => Cow::Borrowed("false"),
            Scalar::Number(number) => Cow::Owned(number.to_string()),
            Scalar::String(text) => Cow::Borrowed(text),
            #[cfg(feature = "chrono")]
            Scalar::DateTime(datetime) => Cow::Owned(datetime.to_rfc3339()),
        }
    }
}

impl Value {
    /// The `null` scalar.
    pub const NULL: Value = Value::Scalar(Scalar::Null);

    /// Builds a string scalar.
    pub fn string(text: impl Into<String>) -> Self {
        Value::Scalar(Scalar::String(text.into()))
    }

    /// Returns true for leaves.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns true for sequences and records.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Record(_))
    }

    /// Returns the string content if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the record if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Looks up a record entry by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Returns the text a value is masked from.
    ///
    /// Scalars use [`Scalar::to_text`]; containers render as compact JSON.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Scalar(scalar) => scalar.to_text(),
            Value::Sequence(_) | Value::Record(_) => Cow::Owned(self.to_string()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::NULL
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// =============================================================================
// Key - The position a value sits at
// =============================================================================

/// Where a value sits inside its parent container.
///
/// Record entries are addressed by name, sequence elements by index. Only names
/// can ever match a sensitive key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl Key<'_> {
    /// Returns the name for record keys.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Returns true when the key, ignoring case, mentions `date` or `time`.
    pub fn mentions_date_or_time(&self) -> bool {
        match self {
            Key::Name(name) => {
                let lowered = name.to_lowercase();
                lowered.contains("date") || lowered.contains("time")
            }
            // Decimal digits never spell either word.
            Key::Index(_) => false,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

// =============================================================================
// Conversions from Rust values
// =============================================================================

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::string(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Scalar(Scalar::Number(number.into()))
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Value::Scalar(Scalar::Number(number.into()))
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON number form and become null.
    fn from(number: f64) -> Self {
        Number::from_f64(number).map_or(Value::NULL, |number| Value::Scalar(Scalar::Number(number)))
    }
}

#[cfg(feature = "chrono")]
impl From<DateTime<FixedOffset>> for Value {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Value::Scalar(Scalar::DateTime(datetime))
    }
}

#[cfg(feature = "chrono")]
impl From<DateTime<chrono::Utc>> for Value {
    fn from(datetime: DateTime<chrono::Utc>) -> Self {
        Value::Scalar(Scalar::DateTime(datetime.fixed_offset()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::NULL, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().collect())
    }
}
