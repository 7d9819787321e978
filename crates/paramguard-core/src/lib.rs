//! # paramguard-core — Foundational Types for Parameter Validation
//!
//! This crate defines the vocabulary shared by every other paramguard
//! crate. It depends on nothing internal.
//!
//! ## Key Types
//!
//! 1. **`Violation`**: one structured constraint failure: the offending
//!    target, the property involved, and a map of constraint key to
//!    human-readable message (`isEmail`, `isDefined`, ...).
//!
//! 2. **`ValidationFailure`**: the aggregate error raised by the call
//!    interceptor. Its message is always `"Validation Error"`; the
//!    structured detail lives in [`ValidationFailure::validation_errors`].
//!
//! 3. **`ValidationBridge`**: the seam between the interceptor and a
//!    schema engine. Validator options are an associated type so the
//!    interceptor forwards them without ever inspecting them.
//!
//! 4. **`resolve_path`**: dotted-path lookup into nested JSON values.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `paramguard-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bridge;
pub mod error;
pub mod identity;
pub mod path;
pub mod violation;

pub use bridge::ValidationBridge;
pub use error::{GuardError, ValidationFailure};
pub use identity::{MethodId, SchemaId};
pub use path::resolve_path;
pub use violation::Violation;
