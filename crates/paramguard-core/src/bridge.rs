//! # Validation Bridge Contract
//!
//! The interceptor never talks to a schema engine directly. It hands a
//! schema name, a candidate value and the caller's options to a
//! [`ValidationBridge`], which shapes the value, runs the engine, and
//! returns structured violations.

use serde_json::Value;

use crate::identity::SchemaId;
use crate::violation::Violation;

/// Adapter from the interceptor to a schema-validation engine.
///
/// Implementations must be deterministic: the same schema, value and
/// options always produce the same violations in the same order.
pub trait ValidationBridge {
    /// Engine options. Opaque to callers of the bridge; they are stored
    /// and forwarded as-is.
    type Options: Clone + Default;

    /// Shape `value` into `schema`'s structure and validate it.
    ///
    /// Returns an empty Vec when the value satisfies the schema. Invalid
    /// input is reported as violations, never as an error.
    fn validate(&self, schema: &SchemaId, value: &Value, options: &Self::Options) -> Vec<Violation>;

    /// Returns true if `schema` can be validated against.
    fn has_schema(&self, schema: &SchemaId) -> bool;
}

