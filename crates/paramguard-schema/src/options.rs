//! # Validator Options
//!
//! Engine options forwarded untouched by the interceptor and interpreted
//! by [`JsonSchemaBridge`](crate::JsonSchemaBridge) and the
//! [`SchemaShaper`](crate::SchemaShaper).

use serde::{Deserialize, Serialize};

/// Options controlling shaping and violation reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Ignore findings about missing or `null` properties.
    pub skip_missing_properties: bool,
    /// Strip properties the schema does not declare before validating.
    pub whitelist: bool,
    /// With `whitelist`, report undeclared properties as
    /// `whitelistValidation` violations instead of stripping them silently.
    pub forbid_non_whitelisted: bool,
    /// Coerce string scalars to the schema's declared integer, number or
    /// boolean type when they parse.
    pub enable_implicit_conversion: bool,
    /// Keep only the first failed constraint of each property. Every
    /// failing property is still reported.
    pub stop_at_first_error: bool,
    /// Attach the validated object to each violation.
    pub validation_error_target: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            skip_missing_properties: false,
            whitelist: false,
            forbid_non_whitelisted: false,
            enable_implicit_conversion: false,
            stop_at_first_error: false,
            validation_error_target: true,
        }
    }
}
