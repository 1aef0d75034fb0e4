//! Masking of sensitive query parameters inside URL-shaped strings.
//!
//! Any string is treated as a URL: everything before the first `?` is the base,
//! the query runs up to the first `#`, and the fragment follows. Only the query
//! is decoded and rewritten; base and fragment are carried over verbatim.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;
use tracing::debug;

use super::{SensitiveKeys, primitive::mask_text};
use crate::{
    options::MaskConfig,
    value::{Key, Value},
};

/// Characters left unescaped in query components (the `encodeURIComponent` set).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Masks the sensitive query parameters of a URL-shaped string value.
///
/// Returns `None` when nothing applies: the value is not a string, it has no
/// query, or none of its parameter names is sensitive. Otherwise returns the
/// URL with every sensitive parameter value masked.
///
/// A query that cannot be decoded (a stray `%` or escapes that are not UTF-8)
/// is dropped: the result is the string up to its first `?`.
///
/// ```rust
/// use deepmask::{MaskOptions, SensitiveKeys, Value, mask_query};
///
/// let config = MaskOptions::new().resolve()?;
/// let keys = SensitiveKeys::new(["c"]);
///
/// let masked = mask_query(&Value::from("blahblah?c=maskThis"), &keys, &config);
/// assert_eq!(masked.as_deref(), Some("blahblah?c=******is"));
/// assert_eq!(mask_query(&Value::from("blahblah?d=keep"), &keys, &config), None);
/// # Ok::<(), deepmask::MaskError>(())
/// ```
pub fn mask_query(value: &Value, keys: &SensitiveKeys, config: &MaskConfig) -> Option<String> {
    let text = value.as_str()?;

    let mut url = match SplitUrl::parse(text) {
        Ok(url) => url,
        Err(err) => {
            debug!(error = %err, "undecodable query string, dropping it");
            return Some(strip_query(text).to_string());
        }
    };

    let mut masked_any = false;
    for (name, value) in &mut url.params {
        if keys.contains(name) {
            *value = mask_text(value.as_str(), Key::Name(name.as_str()), config);
            masked_any = true;
        }
    }

    masked_any.then(|| url.to_string())
}

fn strip_query(text: &str) -> &str {
    text.find('?').map_or(text, |at| &text[..at])
}

/// Why a query string could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum QueryDecodeError {
    #[error("malformed percent escape at byte {position}")]
    MalformedEscape { position: usize },
    #[error("percent escapes do not decode to UTF-8")]
    InvalidUtf8,
}

// =============================================================================
// SplitUrl - A URL broken into base, decoded query and fragment
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
struct SplitUrl<'a> {
    base: &'a str,
    /// Decoded name/value pairs in query order. Names are unique.
    params: Vec<(String, String)>,
    /// Includes the leading `#` when present.
    fragment: &'a str,
}

impl<'a> SplitUrl<'a> {
    fn parse(text: &'a str) -> Result<Self, QueryDecodeError> {
        let (rest, fragment) = text.find('#').map_or((text, ""), |at| text.split_at(at));
        let (base, query) = rest.split_once('?').unwrap_or((rest, ""));

        let mut params: Vec<(String, String)> = Vec::new();
        for pair in query.split('&') {
            let (raw_name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            if raw_name.is_empty() {
                continue;
            }
            let name = decode_component(raw_name)?;
            let value = decode_component(raw_value)?;
            // First occurrence wins.
            if params.iter().any(|(existing, _)| *existing == name) {
                continue;
            }
            params.push((name, value));
        }

        Ok(Self {
            base,
            params,
            fragment,
        })
    }
}

impl fmt::Display for SplitUrl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            f.write_str(if i == 0 { "?" } else { "&" })?;
            write!(
                f,
                "{}={}",
                utf8_percent_encode(name, COMPONENT),
                utf8_percent_encode(value, COMPONENT)
            )?;
        }
        f.write_str(self.fragment)
    }
}

/// Decodes one query component: `+` is a space and every `%` must start a
/// two-digit hex escape.
fn decode_component(raw: &str) -> Result<String, QueryDecodeError> {
    let bytes = raw.as_bytes();
    for (position, _) in raw.match_indices('%') {
        let well_formed = bytes
            .get(position + 1..position + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(QueryDecodeError::MalformedEscape { position });
        }
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| QueryDecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::{QueryDecodeError, SplitUrl, decode_component, mask_query};
    use crate::{
        masking::SensitiveKeys,
        options::{MaskConfig, MaskOptions},
        value::Value,
    };

    fn config() -> MaskConfig {
        MaskOptions::new().resolve().unwrap()
    }

    fn mask(text: &str, keys: &[&str]) -> Option<String> {
        mask_query(&Value::from(text), &SensitiveKeys::new(keys.iter().copied()), &config())
    }

    #[test]
    fn splits_base_query_and_fragment() {
        let url = SplitUrl::parse("https://host/p?a=1&b=two#frag?x=y").unwrap();
        assert_eq!(url.base, "https://host/p");
        assert_eq!(
            url.params,
            [("a".to_string(), "1".to_string()), ("b".to_string(), "two".to_string())]
        );
        assert_eq!(url.fragment, "#frag?x=y");
    }

    #[test]
    fn bare_strings_have_no_params() {
        let url = SplitUrl::parse("just text").unwrap();
        assert_eq!(url.base, "just text");
        assert!(url.params.is_empty());
        assert_eq!(mask("just text", &["just"]), None);
    }

    #[test]
    fn first_duplicate_wins_and_nameless_pairs_drop() {
        let url = SplitUrl::parse("/p?a=1&=x&a=2&flag").unwrap();
        assert_eq!(
            url.params,
            [("a".to_string(), "1".to_string()), ("flag".to_string(), String::new())]
        );
    }

    #[test]
    fn masks_only_sensitive_params() {
        assert_eq!(
            mask("/url-path?d=dontMask&c=maskThis", &["c"]),
            Some("/url-path?d=dontMask&c=******is".to_string())
        );
        assert_eq!(
            mask(
                "https://www.google.co.uk/search?q=shouldbemasked&oq=abc&aqs=shouldbemasked",
                &["q", "aqs"]
            ),
            Some(
                "https://www.google.co.uk/search?q=***********ked&oq=abc&aqs=***********ked"
                    .to_string()
            )
        );
    }

    #[test]
    fn not_applicable_without_sensitive_params() {
        assert_eq!(mask("https://example.com/?page=2", &["token"]), None);
        assert_eq!(
            mask_query(&Value::from(42_i64), &SensitiveKeys::new(["token"]), &config()),
            None
        );
    }

    #[test]
    fn keeps_fragment_after_rewrite() {
        assert_eq!(
            mask("/cb?token=abcdefghij#section", &["token"]),
            Some("/cb?token=********ij#section".to_string())
        );
    }

    #[test]
    fn decodes_and_reencodes_components() {
        assert_eq!(
            mask("/s?q=hello+world&name=J%C3%BCrgen%20M", &["q"]),
            Some("/s?q=*********ld&name=J%C3%BCrgen%20M".to_string())
        );
    }

    #[test]
    fn undecodable_query_is_dropped() {
        assert_eq!(
            mask("https://example.com/path?a=%E0%A4%A", &["zzz"]),
            Some("https://example.com/path".to_string())
        );
        assert_eq!(mask("/p?a=%E0%A4%A4%FF", &["a"]), Some("/p".to_string()));
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            decode_component("ab%2"),
            Err(QueryDecodeError::MalformedEscape { position: 2 })
        );
        assert_eq!(
            decode_component("%zz"),
            Err(QueryDecodeError::MalformedEscape { position: 0 })
        );
        assert_eq!(decode_component("%FF"), Err(QueryDecodeError::InvalidUtf8));
        assert_eq!(decode_component("a%2Bb+c").unwrap(), "a+b c");
    }
}
