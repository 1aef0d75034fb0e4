//! Masking of single scalar values.

use crate::{
    options::{MASK_CHAR, MaskConfig},
    value::{Key, Value},
};

/// Values this short are masked completely, whatever the percentage.
const FULLY_MASKED_MAX_LEN: usize = 3;

/// Masks one value sitting at `key`.
///
/// - Keys mentioning `date` or `time` (any case) yield an empty string unless
///   `mask_time_props_normally` is set.
/// - Values of three characters or fewer are masked entirely.
/// - Otherwise `round(len * (percentage / 100))` characters are masked, counted
///   from the start, or from the end when `mask_from_right` is set.
///
/// Lengths count Unicode scalar values.
///
/// ```rust
/// use deepmask::{Key, MaskOptions, Value, mask_primitive};
///
/// let config = MaskOptions::new().resolve()?;
/// assert_eq!(mask_primitive(&Value::from("aaaaaa"), Key::Name("b"), &config), "*****a");
/// assert_eq!(mask_primitive(&Value::from("xx"), Key::Name("c"), &config), "**");
/// assert_eq!(mask_primitive(&Value::from("2020-01-01"), Key::Name("createDate"), &config), "");
/// # Ok::<(), deepmask::MaskError>(())
/// ```
pub fn mask_primitive(value: &Value, key: Key<'_>, config: &MaskConfig) -> String {
    mask_text(&value.to_text(), key, config)
}

pub(crate) fn mask_text(text: &str, key: Key<'_>, config: &MaskConfig) -> String {
    if key.mentions_date_or_time() && !config.mask_time_props_normally() {
        return String::new();
    }

    let len = text.chars().count();
    if len <= FULLY_MASKED_MAX_LEN {
        return std::iter::repeat_n(MASK_CHAR, len).collect();
    }

    let masked = ((len as f64) * (config.percentage() / 100.0)).round() as usize;
    let masked = masked.min(len);

    if config.mask_from_right() {
        let visible = len - masked;
        text.chars()
            .enumerate()
            .map(|(i, ch)| if i < visible { ch } else { MASK_CHAR })
            .collect()
    } else {
        text.chars()
            .enumerate()
            .map(|(i, ch)| if i < masked { MASK_CHAR } else { ch })
            .collect()
    }
}
