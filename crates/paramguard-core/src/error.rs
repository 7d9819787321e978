//! # Error Types
//!
//! Two error families with different lifetimes:
//!
//! - [`ValidationFailure`] is raised per call by the interceptor. It is
//!   either absent (the call proceeds) or carries the complete ordered
//!   list of violations for that call.
//! - [`GuardError`] covers setup: loading schemas and manifests, compiling
//!   validators, and checking that registrations reference known schemas.

use std::fmt;

use thiserror::Error;

use crate::violation::Violation;

/// Aggregate failure for one intercepted call.
///
/// The display message is always `"Validation Error"`. Callers inspect
/// [`validation_errors`](Self::validation_errors) for detail.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation Error")]
pub struct ValidationFailure {
    validation_errors: Vec<Violation>,
}

impl ValidationFailure {
    /// Build a failure from the collected violations.
    pub fn new(validation_errors: Vec<Violation>) -> Self {
        Self { validation_errors }
    }

    /// Build a failure carrying exactly one violation.
    pub fn single(violation: Violation) -> Self {
        Self {
            validation_errors: vec![violation],
        }
    }

    /// The ordered violations collected for the call.
    pub fn validation_errors(&self) -> &[Violation] {
        &self.validation_errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_violations(self) -> Vec<Violation> {
        self.validation_errors
    }

    /// Render every violation on its own line.
    pub fn report(&self) -> Report<'_> {
        Report(self)
    }
}

/// Multi-line rendering of a [`ValidationFailure`].
pub struct Report<'a>(&'a ValidationFailure);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        for v in &self.0.validation_errors {
            write!(f, "\n  {v}")?;
        }
        Ok(())
    }
}

/// Setup-time errors.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A schema file or directory could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema name, filename or directory.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// A schema was loaded but could not be compiled into a validator.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema name.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A parameter registration references a schema the bridge does not know.
    #[error("method '{method}' parameter {position} references unknown schema '{schema}'")]
    UnknownSchema {
        /// Method owning the registration.
        method: String,
        /// Argument position of the registration.
        position: usize,
        /// The missing schema name.
        schema: String,
    },

    /// A guard manifest could not be read or parsed.
    #[error("manifest error for '{path}': {reason}")]
    Manifest {
        /// Path (or label) of the manifest.
        path: String,
        /// Reason the manifest was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_is_fixed() {
        let failure = ValidationFailure::single(
            Violation::new("name").with_constraint("isEmail", "name must be an email"),
        );
        assert_eq!(failure.to_string(), "Validation Error");
        assert_eq!(failure.validation_errors().len(), 1);
    }

    #[test]
    fn test_report_lists_each_violation() {
        let failure = ValidationFailure::new(vec![
            Violation::new("a").with_constraint("isDefined", "a should not be null or undefined"),
            Violation::new("b").with_constraint("isString", "b must be a string"),
        ]);
        let report = failure.report().to_string();
        assert!(report.starts_with("Validation Error"));
        assert!(report.contains("\n  a: a should not be null or undefined"));
        assert!(report.contains("\n  b: b must be a string"));
    }

    #[test]
    fn test_unknown_schema_display() {
        let err = GuardError::UnknownSchema {
            method: "svc::create".into(),
            position: 1,
            schema: "MissingDto".into(),
        };
        assert_eq!(
            err.to_string(),
            "method 'svc::create' parameter 1 references unknown schema 'MissingDto'"
        );
    }
}
