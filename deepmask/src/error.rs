//! Errors surfaced to callers.
//!
//! Masking itself is total: malformed leaves are handled with local fallbacks.
//! The only failure a caller can observe is an invalid configuration, and it is
//! reported before any value is touched.

use thiserror::Error;

/// Error returned by the masking entrypoints.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    /// A caller-supplied option failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Reason an option override was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `percentage` is not a number in `[0, 100]`.
    #[error("percentage must be a number between 0 and 100, got {0}")]
    InvalidPercentage(String),
    /// A flag option holds something other than a boolean.
    #[error("`{0}` must be a boolean")]
    NotABoolean(&'static str),
    /// The options value is not a key/value object.
    #[error("options must be an object")]
    NotAnObject,
}
