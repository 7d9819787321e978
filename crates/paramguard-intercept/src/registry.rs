//! # Parameter Registry
//!
//! Records, per method, which argument positions are validated and how.
//!
//! ## Registration Rules
//!
//! - Every registration flags its position. Registering a position twice
//!   flags it twice; flags are only ever consulted as "is present".
//! - An override (validate a nested path against an explicit schema) is
//!   recorded only when both the target path and the schema are given.
//!   The path may be empty, meaning the argument itself. A later override
//!   for the same position replaces the earlier one.
//! - Registration never fails. Positions beyond a call's argument count
//!   are simply inert.
//!
//! The registry is built during setup and then shared read-only.

use std::collections::{BTreeMap, HashMap};

use paramguard_core::{GuardError, MethodId, SchemaId, ValidationBridge};

use crate::declared::DeclaredType;
use crate::signature::MethodSignature;

/// One parameter registration as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRegistration {
    /// Argument position.
    pub position: usize,
    /// Dotted path into the argument to validate instead of the argument.
    pub target_path: Option<String>,
    /// Schema to validate against instead of the declared type.
    pub validator_schema: Option<SchemaId>,
}

impl ParamRegistration {
    /// Validate the raw argument at `position` against its declared type.
    pub fn raw(position: usize) -> Self {
        Self {
            position,
            target_path: None,
            validator_schema: None,
        }
    }

    /// Validate `target_path` within the argument against `schema`.
    pub fn at(
        position: usize,
        target_path: impl Into<String>,
        schema: impl Into<SchemaId>,
    ) -> Self {
        Self {
            position,
            target_path: Some(target_path.into()),
            validator_schema: Some(schema.into()),
        }
    }

    /// The override this registration activates, if any.
    fn active_override(&self) -> Option<ParamOverride> {
        match (&self.target_path, &self.validator_schema) {
            (Some(target_path), Some(validator_schema)) => Some(ParamOverride {
                target_path: target_path.clone(),
                validator_schema: validator_schema.clone(),
            }),
            _ => None,
        }
    }
}

/// Active override for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamOverride {
    /// Dotted path resolved against the argument. Empty means the argument itself.
    pub target_path: String,
    /// Schema replacing the declared type.
    pub validator_schema: SchemaId,
}

/// Validation metadata of one method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodParams {
    declared: Vec<DeclaredType>,
    flagged: Vec<usize>,
    overrides: BTreeMap<usize, ParamOverride>,
}

impl MethodParams {
    /// Create metadata with the given declared types and nothing flagged.
    pub fn new(declared: Vec<DeclaredType>) -> Self {
        Self {
            declared,
            ..Self::default()
        }
    }

    /// Flag a position, recording its override when one is active.
    pub fn register(&mut self, registration: ParamRegistration) {
        if let Some(active) = registration.active_override() {
            self.overrides.insert(registration.position, active);
        }
        self.flagged.push(registration.position);
    }

    /// Returns true if any position is flagged.
    pub fn has_flagged(&self) -> bool {
        !self.flagged.is_empty()
    }

    /// Returns true if `position` is flagged.
    pub fn is_flagged(&self, position: usize) -> bool {
        self.flagged.contains(&position)
    }

    /// Flagged positions in registration order, duplicates included.
    pub fn flagged(&self) -> &[usize] {
        &self.flagged
    }

    /// The active override for `position`, if any.
    pub fn override_for(&self, position: usize) -> Option<&ParamOverride> {
        self.overrides.get(&position)
    }

    /// Declared type of `position`; untyped when none was declared.
    pub fn declared_type(&self, position: usize) -> &DeclaredType {
        static UNTYPED: DeclaredType = DeclaredType::Untyped;
        self.declared.get(position).unwrap_or(&UNTYPED)
    }

    /// Declared types in position order.
    pub fn declared(&self) -> &[DeclaredType] {
        &self.declared
    }
}

/// Registry of validation metadata for every intercepted method.
#[derive(Debug, Clone, Default)]
pub struct ParamRegistry {
    methods: HashMap<MethodId, MethodParams>,
}

impl ParamRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared types of `method`, keeping existing registrations.
    pub fn declare(
        &mut self,
        method: impl Into<MethodId>,
        declared: Vec<DeclaredType>,
    ) -> &mut Self {
        self.methods.entry(method.into()).or_default().declared = declared;
        self
    }

    /// Register one parameter of `method`.
    ///
    /// See the module documentation for how `target_path` and
    /// `validator_schema` combine.
    pub fn register_param(
        &mut self,
        method: impl Into<MethodId>,
        position: usize,
        target_path: Option<&str>,
        validator_schema: Option<SchemaId>,
    ) -> &mut Self {
        let method = method.into();
        let registration = ParamRegistration {
            position,
            target_path: target_path.map(str::to_owned),
            validator_schema,
        };
        tracing::debug!(
            method = %method,
            position,
            target_path = ?registration.target_path,
            schema = ?registration.validator_schema,
            "registered parameter"
        );
        self.methods.entry(method).or_default().register(registration);
        self
    }

    /// Register a whole method signature: its declared types and every
    /// parameter registration it carries.
    pub fn register(&mut self, signature: MethodSignature) -> &mut Self {
        let (method, declared, registrations) = signature.into_parts();
        self.declare(method.clone(), declared);
        for registration in registrations {
            let ParamRegistration {
                position,
                target_path,
                validator_schema,
            } = registration;
            self.register_param(method.clone(), position, target_path.as_deref(), validator_schema);
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, signature: MethodSignature) -> Self {
        self.register(signature);
        self
    }

    /// Validation metadata of `method`, if it has any.
    pub fn method(&self, method: &MethodId) -> Option<&MethodParams> {
        self.methods.get(method)
    }

    /// Returns the number of methods with metadata.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no method has metadata.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Check that every schema a flagged position names is known to
    /// `bridge`: its declared type (including `Name[]`) and its override.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::UnknownSchema` for the first missing schema,
    /// in method-name then position order.
    pub fn check_schemas<B: ValidationBridge>(&self, bridge: &B) -> Result<(), GuardError> {
        let mut methods: Vec<_> = self.methods.iter().collect();
        methods.sort_by(|a, b| a.0.cmp(b.0));

        for (method, params) in methods {
            let mut positions = params.flagged.clone();
            positions.sort_unstable();
            positions.dedup();
            for position in positions {
                let declared = params.declared_type(position).referenced_schema();
                let overridden = params.override_for(position).map(|o| &o.validator_schema);
                for schema in declared.into_iter().chain(overridden) {
                    if !bridge.has_schema(schema) {
                        return Err(GuardError::UnknownSchema {
                            method: method.to_string(),
                            position,
                            schema: schema.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
