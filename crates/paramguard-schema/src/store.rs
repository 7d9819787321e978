//! # Schema Store
//!
//! Named JSON Schema documents, loaded from disk or registered inline.
//!
//! ## Naming
//!
//! A file `BodyDto.schema.json` is stored under the name `BodyDto`.
//! Registrations refer to schemas by that name.
//!
//! ## `$ref` Resolution
//!
//! [`SchemaStore::retriever`] resolves cross-schema references locally.
//! A reference matches a stored schema by its `$id`, by its name, or by
//! the last URI segment with or without the `.schema.json` suffix, so
//! `{"$ref": "Address.schema.json"}` and `{"$ref": "Address"}` both work.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri};
use paramguard_core::GuardError;
use serde_json::Value;

const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Named JSON schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    /// Directory the schemas were loaded from, if any.
    schema_dir: Option<PathBuf>,
    /// Map from schema name to parsed schema document.
    schemas: BTreeMap<String, Value>,
}

impl SchemaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.schema.json` file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::SchemaLoad` if the directory cannot be read or
    /// a schema file is not valid JSON.
    pub fn from_dir(schema_dir: impl AsRef<Path>) -> Result<Self, GuardError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = BTreeMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| GuardError::SchemaLoad {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| GuardError::SchemaLoad {
                    schema_name: schema_dir.display().to_string(),
                    reason: format!("cannot read schema directory entry: {e}"),
                })?
                .path();
            let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(SCHEMA_FILE_SUFFIX))
            else {
                continue;
            };
            let content =
                std::fs::read_to_string(&path).map_err(|e| GuardError::SchemaLoad {
                    schema_name: name.to_string(),
                    reason: format!("cannot read {}: {e}", path.display()),
                })?;
            let value: Value =
                serde_json::from_str(&content).map_err(|e| GuardError::SchemaLoad {
                    schema_name: name.to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;
            tracing::debug!(schema = name, path = %path.display(), "loaded schema");
            schemas.insert(name.to_string(), value);
        }

        Ok(Self {
            schema_dir: Some(schema_dir),
            schemas,
        })
    }

    /// Register (or replace) a schema under `name`.
    pub fn insert(&mut self, name: impl Into<String>, schema: Value) -> &mut Self {
        self.schemas.insert(name.into(), schema);
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.insert(name, schema);
        self
    }

    /// Returns the directory the store was loaded from.
    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }

    /// Returns the number of stored schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schemas are stored.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns the names of all stored schemas, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Iterate over `(name, schema)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a retriever that resolves `$ref`s against this store.
    pub(crate) fn retriever(&self) -> LocalSchemaRetriever {
        let mut by_uri = BTreeMap::new();
        for (name, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                by_uri.insert(id.to_string(), value.clone());
            }
            by_uri.insert(name.clone(), value.clone());
            by_uri.insert(format!("{name}{SCHEMA_FILE_SUFFIX}"), value.clone());
        }
        LocalSchemaRetriever { by_uri }
    }
}

/// Resolves `$ref` URIs to schemas held in memory. Never touches the
/// network.
pub(crate) struct LocalSchemaRetriever {
    by_uri: BTreeMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let last_segment = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.by_uri.get(last_segment) {
            return Ok(value.clone());
        }

        Err(format!("unresolved schema reference '{uri_str}'").into())
    }
}
