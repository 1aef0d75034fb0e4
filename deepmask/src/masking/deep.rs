//! Full masking of a subtree whose key already matched.

use super::primitive::mask_primitive;
use crate::{
    options::MaskConfig,
    value::{Key, Value},
};

/// Masks every maskable leaf of `subtree`, whatever its own key.
///
/// Leaves take the key they sit at as masking context: record entries use their
/// own key, sequence elements their index. Values the classifier rejects that
/// are not containers pass through unchanged.
pub fn mask_all(subtree: Value, key: Key<'_>, config: &MaskConfig) -> Value {
    if config.is_maskable(&subtree) {
        return Value::string(mask_primitive(&subtree, key, config));
    }

    match subtree {
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| mask_all(item, Key::Index(index), config))
            .collect(),
        Value::Record(record) => Value::Record(
            record.map_values(|name, value| mask_all(value, Key::Name(name), config)),
        ),
        scalar @ Value::Scalar(_) => scalar,
    }
}
