//! Insertion-ordered records.

use std::collections::{HashMap, hash_map::Entry};

use super::Value;

/// A map from unique string keys to values that remembers insertion order.
///
/// Lookups are linear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps entries whose keys are already known to be unique.
    pub(crate) fn from_unique_entries(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry.
    ///
    /// An existing key keeps its position and has its value replaced; the old
    /// value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns true when `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Maps every value, keeping keys and their order.
    #[must_use]
    pub fn map_values<F>(self, mut f: F) -> Self
    where
        F: FnMut(&str, Value) -> Value,
    {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, value)| {
                let value = f(&key, value);
                (key, value)
            })
            .collect();
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    /// A repeated key keeps its first position and takes the last value, as
    /// with [`Record::insert`].
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (key, value) in iter {
            let value = value.into();
            match positions.entry(key.into()) {
                Entry::Occupied(slot) => entries[*slot.get()].1 = value,
                Entry::Vacant(slot) => {
                    entries.push((slot.key().clone(), value));
                    slot.insert(entries.len() - 1);
                }
            }
        }
        Self { entries }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::value::Value;

    #[test]
    fn insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("a", 1_i64);
        record.insert("b", 2_i64);
        let previous = record.insert("a", 3_i64);

        assert_eq!(previous, Some(Value::from(1_i64)));
        assert_eq!(record.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::from(3_i64)));
        assert!(record.contains_key("b"));
        assert!(!record.contains_key("c"));
    }

    #[test]
    fn map_values_preserves_order() {
        let record: Record = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let mapped = record.map_values(|key, _| Value::from(key));

        let entries: Vec<_> = mapped.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            [
                ("z".to_string(), Value::from("z")),
                ("a".to_string(), Value::from("a")),
                ("m".to_string(), Value::from("m")),
            ]
        );
    }

    #[test]
    fn collecting_repeated_keys_keeps_the_first_position() {
        let record: Record = [("a", 1_i64), ("b", 2_i64), ("a", 3_i64)].into_iter().collect();

        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::from(3_i64)));
    }

    #[test]
    fn collects_wide_records() {
        let record: Record = (0..100_000_u64).map(|i| (format!("k{i}"), i)).collect();

        assert_eq!(record.len(), 100_000);
        assert_eq!(record.keys().next(), Some("k0"));
        assert_eq!(record.get("k99999"), Some(&Value::from(99_999_u64)));
    }
}
