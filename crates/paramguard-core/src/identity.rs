//! # Identifier Newtypes
//!
//! Schema and method names are both plain strings on the wire. Wrapping
//! them keeps a schema name from being passed where a method name is
//! expected when building registries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a schema known to a validation bridge (e.g. `"BodyDto"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(String);

/// Identity of an intercepted method (e.g. `"UserService::create"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(String);

impl SchemaId {
    /// Create a schema identifier from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the schema name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl MethodId {
    /// Create a method identifier from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the method name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SchemaId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SchemaId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for MethodId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MethodId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
