//! # paramguard-schema — JSON Schema Validation Bridge
//!
//! Implements [`paramguard_core::ValidationBridge`] on top of the
//! `jsonschema` crate (Draft 2020-12, format assertions enabled).
//!
//! ## Pipeline
//!
//! For every candidate value the [`JsonSchemaBridge`]:
//!
//! 1. looks up the compiled validator for the requested schema,
//! 2. shapes the value with its [`Shaper`] (defaults, optional implicit
//!    conversion and whitelisting),
//! 3. runs the validator and maps each engine error to a constraint key
//!    (`format: email` → `isEmail`, `required` → `isDefined`, ...),
//!    grouping them into one [`Violation`](paramguard_core::Violation)
//!    per property.
//!
//! ## Schema Resolution
//!
//! Schemas live in a [`SchemaStore`], either loaded from a directory of
//! `<Name>.schema.json` files or inserted inline. Cross-schema `$ref`s are
//! resolved from the store only; nothing is fetched over the network and
//! an unresolved reference fails validator compilation.
//!
//! ## Crate Policy
//!
//! - Depends only on `paramguard-core` internally.
//! - [`ValidatorOptions`] are interpreted here and nowhere else.

pub mod bridge;
pub mod constraints;
pub mod options;
pub mod shape;
pub mod store;

pub use bridge::JsonSchemaBridge;
pub use options::ValidatorOptions;
pub use shape::{SchemaShaper, Shaper};
pub use store::SchemaStore;
