//! # JSON Schema Bridge
//!
//! [`JsonSchemaBridge`] implements [`ValidationBridge`] over compiled
//! `jsonschema` validators. Every schema in the store is compiled once at
//! construction; validation itself keeps no state between calls.
//!
//! ## Reporting
//!
//! Engine errors are grouped by property: one [`Violation`] per failing
//! property, carrying every constraint key that failed for it, in the
//! order the engine reported them. The violation's `target` is the shaped
//! object that holds the property.

use std::collections::HashMap;
use std::fmt;

use jsonschema::Validator;
use paramguard_core::{GuardError, SchemaId, ValidationBridge, Violation};
use serde_json::Value;

use crate::constraints::{self, Finding};
use crate::options::ValidatorOptions;
use crate::shape::{undeclared_properties, SchemaShaper, Shaper};
use crate::store::SchemaStore;

/// Validation bridge backed by the `jsonschema` crate.
///
/// `Send + Sync`: compiled validators are shared read-only.
pub struct JsonSchemaBridge {
    store: SchemaStore,
    validators: HashMap<SchemaId, Validator>,
    shaper: Box<dyn Shaper>,
}

impl fmt::Debug for JsonSchemaBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaBridge")
            .field("schemas", &self.store.names())
            .finish_non_exhaustive()
    }
}

impl JsonSchemaBridge {
    /// Compile every schema in `store`.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::ValidatorBuild` if a schema is invalid or has
    /// a `$ref` that cannot be resolved from the store.
    pub fn new(store: SchemaStore) -> Result<Self, GuardError> {
        let mut validators = HashMap::with_capacity(store.len());
        for (name, schema) in store.iter() {
            let validator = jsonschema::options()
                .with_draft(jsonschema::Draft::Draft202012)
                .should_validate_formats(true)
                .with_retriever(store.retriever())
                .build(schema)
                .map_err(|e| GuardError::ValidatorBuild {
                    schema_name: name.to_string(),
                    reason: e.to_string(),
                })?;
            tracing::debug!(schema = name, "compiled validator");
            validators.insert(SchemaId::new(name), validator);
        }
        Ok(Self {
            store,
            validators,
            shaper: Box::new(SchemaShaper),
        })
    }

    /// Replace the default [`SchemaShaper`].
    pub fn with_shaper(mut self, shaper: impl Shaper + 'static) -> Self {
        self.shaper = Box::new(shaper);
        self
    }

    /// The schemas this bridge validates against.
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    fn collect(
        &self,
        validator: &Validator,
        schema: &Value,
        value: &Value,
        options: &ValidatorOptions,
    ) -> Vec<Violation> {
        let mut findings = Vec::new();

        if options.whitelist && options.forbid_non_whitelisted {
            for property in undeclared_properties(schema, value) {
                let (parent, leaf) = property.rsplit_once('.').unwrap_or(("", property.as_str()));
                findings.push(Finding {
                    parent_pointer: dotted_to_pointer(parent),
                    value: value.pointer(&dotted_to_pointer(&property)).cloned(),
                    key: "whitelistValidation".to_string(),
                    message: format!("property {leaf} should not exist"),
                    property,
                });
            }
        }

        let shaped = self.shaper.shape(schema, value, options);
        findings.extend(
            validator
                .iter_errors(&shaped)
                .flat_map(|error| constraints::describe(&error, schema)),
        );

        let mut violations: Vec<Violation> = Vec::new();
        for finding in findings {
            let missing =
                finding.key == "isDefined" || finding.value.as_ref().is_some_and(Value::is_null);
            if options.skip_missing_properties && missing {
                continue;
            }

            let existing = violations
                .iter_mut()
                .find(|v| v.property == finding.property);
            if let Some(existing) = existing {
                if !options.stop_at_first_error {
                    existing
                        .constraints
                        .entry(finding.key)
                        .or_insert(finding.message);
                }
                continue;
            }

            let mut violation = Violation::new(finding.property)
                .with_constraint(finding.key, finding.message);
            violation.value = finding.value;
            if options.validation_error_target {
                violation.target = shaped.pointer(&finding.parent_pointer).cloned();
            }
            violations.push(violation);
        }
        violations
    }
}

impl ValidationBridge for JsonSchemaBridge {
    type Options = ValidatorOptions;

    fn validate(
        &self,
        schema: &SchemaId,
        value: &Value,
        options: &ValidatorOptions,
    ) -> Vec<Violation> {
        let (Some(validator), Some(definition)) =
            (self.validators.get(schema), self.store.get(schema.as_str()))
        else {
            tracing::warn!(%schema, "validation requested against unregistered schema");
            return vec![Violation::new("").with_constraint(
                "schemaRegistered",
                format!("schema {schema} is not registered"),
            )];
        };

        self.collect(validator, definition, value, options)
    }

    fn has_schema(&self, schema: &SchemaId) -> bool {
        self.validators.contains_key(schema)
    }
}

/// `address.city` → `/address/city`.
fn dotted_to_pointer(dotted: &str) -> String {
    if dotted.is_empty() {
        return String::new();
    }
    dotted
        .split('.')
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect()
}
