//! Key-directed masking for nested, dynamically shaped data.
//!
//! This crate separates:
//! - **Options**: how values are masked (percentage, direction, date/time handling).
//! - **Masking**: which values are masked, decided by walking a [`Value`] tree and
//!   matching record keys and URL query-parameter names against a set of
//!   [`SensitiveKeys`].
//!
//! What this crate does:
//! - masks the value of every record entry whose key is sensitive, recursively
//! - masks sensitive query parameters inside any string that splits as a URL
//! - preserves the shape of the input (container kinds, keys, order, lengths)
//! - provides logging integrations (`tracing` always, `slog` behind a feature)
//!
//! What it does not do:
//! - detect PII by content
//! - guarantee that masked data is unrecoverable (this is obfuscation, not encryption)
//! - perform I/O
//!
//! # Example
//!
//! ```rust
//! use deepmask::{MaskOptions, Value, find_and_mask};
//! use serde_json::json;
//!
//! let source = Value::from(json!({
//!     "user": "alice",
//!     "password": "hunter22",
//!     "callback": "/hook?token=abcdefghij&page=2",
//! }));
//!
//! let masked = find_and_mask(source, ["password", "token"], MaskOptions::new()).unwrap();
//! assert_eq!(
//!     serde_json::Value::from(masked),
//!     json!({
//!         "user": "alice",
//!         "password": "******22",
//!         "callback": "/hook?token=********ij&page=2",
//!     })
//! );
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod error;
mod masking;
pub mod options;
#[cfg(feature = "slog")]
pub mod slog;
pub mod tracing;
pub mod value;

pub use error::{ConfigError, MaskError};
pub use masking::{
    Masker, SensitiveKeys, find_and_mask, find_and_mask_json, mask_all, mask_primitive,
    mask_query,
};
pub use options::{
    Classifier, DEFAULT_PERCENTAGE, MASK_CHAR, MaskConfig, MaskOptions, default_is_maskable,
};
pub use value::{Key, Record, Scalar, Value};
