//! # Validation Violations
//!
//! A [`Violation`] records every failed constraint for one property of one
//! validated value. Constraint keys are machine-readable (`isEmail`,
//! `isDefined`, `isArray`, ...); their values are the human-readable
//! messages shown to callers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One property's constraint failures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Violation {
    /// The object that was validated, when the engine reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    /// Dotted path of the failing property within `target`. Empty for
    /// violations about the value as a whole.
    #[serde(default)]
    pub property: String,
    /// The failing property's value, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Constraint key to human-readable message.
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,
}

impl Violation {
    /// Create a violation for `property` with no constraints yet.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ..Self::default()
        }
    }

    /// Add (or replace) a constraint message.
    pub fn with_constraint(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.constraints.insert(key.into(), message.into());
        self
    }

    /// Attach the validated object.
    pub fn with_target(mut self, target: Value) -> Self {
        self.target = Some(target);
        self
    }

    /// Attach the failing property's value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Look up the message for a constraint key.
    pub fn constraint(&self, key: &str) -> Option<&str> {
        self.constraints.get(key).map(String::as_str)
    }

    /// Returns true if this violation carries the given constraint key.
    pub fn has_constraint(&self, key: &str) -> bool {
        self.constraints.contains_key(key)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = if self.property.is_empty() {
            "(root)"
        } else {
            self.property.as_str()
        };
        write!(f, "{property}:")?;
        for (i, message) in self.constraints.values().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, " {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_lookup() {
        let v = Violation::new("name")
            .with_target(json!({"name": "sds"}))
            .with_value(json!("sds"))
            .with_constraint("isEmail", "name must be an email");
        assert_eq!(v.constraint("isEmail"), Some("name must be an email"));
        assert!(v.has_constraint("isEmail"));
        assert!(!v.has_constraint("isDefined"));
        assert_eq!(v.target, Some(json!({"name": "sds"})));
    }

    #[test]
    fn test_display_root_and_multiple_constraints() {
        let v = Violation::new("")
            .with_constraint("isArray", "input param must be array");
        assert_eq!(v.to_string(), "(root): input param must be array");

        let v = Violation::new("code")
            .with_constraint("maxLength", "code is too long")
            .with_constraint("matches", "code has the wrong shape");
        assert_eq!(v.to_string(), "code: code has the wrong shape; code is too long");
    }

    #[test]
    fn test_serialization_omits_empty_optionals() {
        let v = Violation::new("body").with_constraint("isDefined", "property body is missing");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            json!({
                "property": "body",
                "constraints": {"isDefined": "property body is missing"}
            })
        );
    }
}
