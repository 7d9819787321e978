//! # Call Interceptor
//!
//! [`Interceptor`] validates a call's arguments against the metadata in a
//! [`ParamRegistry`]; [`GuardedMethod`] binds it to one callable.
//!
//! ## Per-Call Algorithm
//!
//! 1. A method with no flagged positions is forwarded untouched.
//! 2. Each flagged position present in the call, in argument order:
//!    - Without an override, the raw argument is validated against its
//!      declared type.
//!    - With an override, the value at the override path is validated
//!      against the override schema. An absent or falsy value (`null`,
//!      `false`, `0`, `""`) fails the whole call at once with a single
//!      `isDefined` violation. When the declared type is an array, a
//!      non-array value fails the call at once with a single `isArray`
//!      violation; an array has each element validated against the
//!      override schema, and the array as a whole is not validated again.
//! 3. Constraint violations from every position are collected; any
//!    violation fails the call with all of them.
//! 4. Otherwise the original arguments are passed to the wrapped method
//!    and its result is returned unchanged.
//!
//! The fail-fast cases discard violations already collected from earlier
//! positions of the same call.

use std::fmt;
use std::sync::Arc;

use paramguard_core::{
    resolve_path, GuardError, MethodId, ValidationBridge, ValidationFailure, Violation,
};
use serde_json::Value;

use crate::registry::ParamRegistry;

/// Validates calls against a shared [`ParamRegistry`].
pub struct Interceptor<B: ValidationBridge> {
    registry: Arc<ParamRegistry>,
    bridge: Arc<B>,
    options: B::Options,
}

impl<B: ValidationBridge> Clone for Interceptor<B> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            bridge: Arc::clone(&self.bridge),
            options: self.options.clone(),
        }
    }
}

impl<B: ValidationBridge> fmt::Debug for Interceptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("methods", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl<B: ValidationBridge> Interceptor<B> {
    /// Create an interceptor with default validator options.
    pub fn new(registry: Arc<ParamRegistry>, bridge: Arc<B>) -> Self {
        Self {
            registry,
            bridge,
            options: B::Options::default(),
        }
    }

    /// Like [`new`](Self::new), but first checks that every schema the
    /// registry refers to is known to `bridge`.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::UnknownSchema` if a registration references a
    /// schema `bridge` cannot validate against.
    pub fn checked(registry: Arc<ParamRegistry>, bridge: Arc<B>) -> Result<Self, GuardError> {
        registry.check_schemas(bridge.as_ref())?;
        Ok(Self::new(registry, bridge))
    }

    /// Set the options forwarded to the bridge on every validation.
    pub fn with_options(mut self, options: B::Options) -> Self {
        self.options = options;
        self
    }

    /// The registry this interceptor reads.
    pub fn registry(&self) -> &ParamRegistry {
        &self.registry
    }

    /// Validate one call of `method` with `args`.
    ///
    /// # Errors
    ///
    /// Returns the aggregate [`ValidationFailure`] when any flagged
    /// argument is invalid.
    pub fn check(&self, method: &MethodId, args: &[Value]) -> Result<(), ValidationFailure> {
        let Some(params) = self.registry.method(method).filter(|p| p.has_flagged()) else {
            return Ok(());
        };

        let mut violations = Vec::new();

        for (position, arg) in args.iter().enumerate() {
            if !params.is_flagged(position) {
                continue;
            }
            let declared = params.declared_type(position);

            let (value, schema) = match params.override_for(position) {
                None => (arg, declared.raw_schema()),
                Some(active) => {
                    let value = match resolve_path(arg, Some(active.target_path.as_str())) {
                        Some(found) if !is_falsy(found) => found,
                        _ => {
                            return Err(ValidationFailure::single(missing_path(
                                &active.target_path,
                                arg,
                            )))
                        }
                    };

                    if declared.is_array() {
                        let Value::Array(items) = value else {
                            return Err(ValidationFailure::single(not_an_array(
                                &active.target_path,
                                value,
                            )));
                        };
                        for item in items {
                            violations.extend(self.bridge.validate(
                                &active.validator_schema,
                                item,
                                &self.options,
                            ));
                        }
                        // The schema describes one element, not the array.
                        continue;
                    }

                    (value, Some(&active.validator_schema))
                }
            };

            if let Some(schema) = schema {
                violations.extend(self.bridge.validate(schema, value, &self.options));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(violations))
        }
    }

    /// Bind this interceptor to `inner`, registered as `method`.
    pub fn wrap<F>(&self, method: impl Into<MethodId>, inner: F) -> GuardedMethod<B, F> {
        GuardedMethod {
            interceptor: self.clone(),
            method: method.into(),
            inner,
        }
    }
}

/// A callable whose arguments are validated before it runs.
pub struct GuardedMethod<B: ValidationBridge, F> {
    interceptor: Interceptor<B>,
    method: MethodId,
    inner: F,
}

impl<B: ValidationBridge, F> GuardedMethod<B, F> {
    /// Validate `args` and, if they pass, call the wrapped method with them.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] without calling the wrapped method
    /// when validation fails.
    pub fn call<R>(&self, args: &[Value]) -> Result<R, ValidationFailure>
    where
        F: Fn(&[Value]) -> R,
    {
        self.interceptor.check(&self.method, args)?;
        Ok((self.inner)(args))
    }

    /// The method identity used for registry lookups.
    pub fn method(&self) -> &MethodId {
        &self.method
    }
}

impl<B: ValidationBridge, F> fmt::Debug for GuardedMethod<B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedMethod")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// `null`, `false`, zero and the empty string count as missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn missing_path(target_path: &str, arg: &Value) -> Violation {
    Violation::new(target_path)
        .with_target(arg.clone())
        .with_constraint("isDefined", format!("property {target_path} is missing"))
}

fn not_an_array(target_path: &str, value: &Value) -> Violation {
    Violation::new(target_path)
        .with_value(value.clone())
        .with_constraint("isArray", "input param must be array")
}
