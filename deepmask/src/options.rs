//! Masking options: caller overrides and the resolved configuration.
//!
//! [`MaskOptions`] carries optional overrides. Resolving them merges the
//! overrides onto the defaults and validates the result, producing an immutable
//! [`MaskConfig`] that is shared by reference through a whole masking walk.
//!
//! | option                  | default                         |
//! |-------------------------|---------------------------------|
//! | `percentage`            | `80`                            |
//! | `maskTimePropsNormally` | `false`                         |
//! | `maskFromRight`         | `false`                         |
//! | `isMaskable`            | [`default_is_maskable`]         |
//!
//! # Example
//!
//! ```rust
//! use deepmask::MaskOptions;
//!
//! let config = MaskOptions::new().with_percentage(60.0).mask_from_right(true).resolve()?;
//! assert!(config.mask_from_right());
//!
//! assert!(MaskOptions::new().with_percentage(120.0).resolve().is_err());
//! # Ok::<(), deepmask::MaskError>(())
//! ```

use std::{fmt, sync::Arc};

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::{
    error::{ConfigError, MaskError},
    value::Value,
};

/// Character used to mask sensitive characters.
pub const MASK_CHAR: char = '*';

/// Share of characters masked when no percentage is given.
pub const DEFAULT_PERCENTAGE: f64 = 80.0;

/// Decides whether a value is masked as a single leaf.
///
/// Values the classifier rejects are either walked (sequences and records) or
/// passed through unchanged.
pub type Classifier = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Default classifier: every scalar is maskable, containers are not.
pub fn default_is_maskable(value: &Value) -> bool {
    value.is_scalar()
}

// =============================================================================
// MaskConfig - Resolved configuration
// =============================================================================

/// Validated masking configuration.
///
/// Built by [`MaskOptions::resolve`]; never mutated afterwards.
#[derive(Clone)]
pub struct MaskConfig {
    percentage: f64,
    mask_time_props_normally: bool,
    mask_from_right: bool,
    is_maskable: Classifier,
}

impl MaskConfig {
    /// Share of characters to mask, in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Whether keys mentioning `date` or `time` are masked like any other key
    /// instead of being blanked.
    pub fn mask_time_props_normally(&self) -> bool {
        self.mask_time_props_normally
    }

    /// Whether the masked run sits at the end of the string instead of the start.
    pub fn mask_from_right(&self) -> bool {
        self.mask_from_right
    }

    /// Runs the configured classifier.
    pub fn is_maskable(&self, value: &Value) -> bool {
        (self.is_maskable)(value)
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_PERCENTAGE,
            mask_time_props_normally: false,
            mask_from_right: false,
            is_maskable: Arc::new(default_is_maskable),
        }
    }
}

impl fmt::Debug for MaskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskConfig")
            .field("percentage", &self.percentage)
            .field("mask_time_props_normally", &self.mask_time_props_normally)
            .field("mask_from_right", &self.mask_from_right)
            .finish_non_exhaustive()
    }
}

impl TryFrom<MaskOptions> for MaskConfig {
    type Error = MaskError;

    fn try_from(options: MaskOptions) -> Result<Self, Self::Error> {
        options.resolve()
    }
}

// =============================================================================
// MaskOptions - Caller overrides
// =============================================================================

/// Overrides applied on top of the default [`MaskConfig`].
///
/// Every field is optional. Options deserialize from the camelCase names used
/// in the table at the top of this module; the classifier can only be set in
/// code.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaskOptions {
    percentage: Option<f64>,
    mask_time_props_normally: Option<bool>,
    mask_from_right: Option<bool>,
    #[serde(skip)]
    is_maskable: Option<Classifier>,
}

impl MaskOptions {
    /// Options that keep every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Masks `percentage` percent of each value's characters.
    #[must_use]
    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Masks keys mentioning `date` or `time` like any other key.
    #[must_use]
    pub fn mask_time_props_normally(mut self, enabled: bool) -> Self {
        self.mask_time_props_normally = Some(enabled);
        self
    }

    /// Masks the end of each value instead of the start.
    #[must_use]
    pub fn mask_from_right(mut self, enabled: bool) -> Self {
        self.mask_from_right = Some(enabled);
        self
    }

    /// Replaces the classifier that decides which values are masked as leaves.
    #[must_use]
    pub fn with_classifier<F>(mut self, classifier: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.is_maskable = Some(Arc::new(classifier));
        self
    }

    /// Parses loosely-typed overrides from a JSON object.
    ///
    /// `percentage` may be a number or a numeric string. The flags must be
    /// booleans. `null` counts as absent and unknown keys are ignored. Range
    /// checks happen in [`MaskOptions::resolve`].
    pub fn from_json(options: &JsonValue) -> Result<Self, MaskError> {
        let JsonValue::Object(map) = options else {
            return Err(ConfigError::NotAnObject.into());
        };

        let percentage = match map.get("percentage") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Number(number)) => number.as_f64(),
            Some(JsonValue::String(text)) => Some(
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidPercentage(format!("{text:?}")))?,
            ),
            Some(other) => return Err(ConfigError::InvalidPercentage(other.to_string()).into()),
        };

        Ok(Self {
            percentage,
            mask_time_props_normally: json_flag(map, "maskTimePropsNormally")?,
            mask_from_right: json_flag(map, "maskFromRight")?,
            is_maskable: None,
        })
    }

    /// Merges the overrides onto the defaults and validates the result.
    pub fn resolve(self) -> Result<MaskConfig, MaskError> {
        let defaults = MaskConfig::default();

        let percentage = match self.percentage {
            Some(percentage) if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) => {
                return Err(ConfigError::InvalidPercentage(percentage.to_string()).into());
            }
            Some(percentage) => percentage,
            None => defaults.percentage,
        };

        Ok(MaskConfig {
            percentage,
            mask_time_props_normally: self
                .mask_time_props_normally
                .unwrap_or(defaults.mask_time_props_normally),
            mask_from_right: self.mask_from_right.unwrap_or(defaults.mask_from_right),
            is_maskable: self.is_maskable.unwrap_or(defaults.is_maskable),
        })
    }
}

impl fmt::Debug for MaskOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskOptions")
            .field("percentage", &self.percentage)
            .field("mask_time_props_normally", &self.mask_time_props_normally)
            .field("mask_from_right", &self.mask_from_right)
            .field("is_maskable", &self.is_maskable.as_ref().map(|_| "<classifier>"))
            .finish()
    }
}

fn json_flag(
    map: &serde_json::Map<String, JsonValue>,
    name: &'static str,
) -> Result<Option<bool>, ConfigError> {
    match map.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(ConfigError::NotABoolean(name)),
    }
}
