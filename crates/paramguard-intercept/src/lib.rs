//! # paramguard-intercept — Validating Method Interception
//!
//! Wraps callables so that selected arguments are validated against
//! schemas before the callable runs.
//!
//! ## Setup
//!
//! 1. Describe each method's parameters with a [`MethodSignature`]
//!    (declared type per position, which positions are validated, and
//!    optional `(path, schema)` overrides), or load them from a
//!    [`GuardManifest`].
//! 2. Register the signatures in a [`ParamRegistry`].
//! 3. Build an [`Interceptor`] from the registry and a
//!    [`ValidationBridge`](paramguard_core::ValidationBridge), then
//!    [`wrap`](Interceptor::wrap) each method.
//!
//! ## Call Time
//!
//! A [`GuardedMethod`] validates every flagged argument, collects all
//! constraint violations across arguments, and either returns
//! [`ValidationFailure`](paramguard_core::ValidationFailure) or calls the
//! wrapped method with the original arguments. A missing override path,
//! or a non-array value where an array was declared, fails the call
//! immediately with that single violation.
//!
//! ## Crate Policy
//!
//! - The registry is immutable once shared; there is no global state.
//! - The call path performs no logging and never mutates arguments.

pub mod declared;
pub mod interceptor;
pub mod manifest;
pub mod registry;
pub mod signature;

pub use declared::DeclaredType;
pub use interceptor::{GuardedMethod, Interceptor};
pub use manifest::GuardManifest;
pub use registry::{MethodParams, ParamOverride, ParamRegistration, ParamRegistry};
pub use signature::MethodSignature;
