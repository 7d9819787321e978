//! # Guard Manifests
//!
//! YAML description of schemas, validator options and method parameters,
//! so a guard can be assembled without code:
//!
//! ```yaml
//! schema_dir: schemas          # relative to the manifest file
//! schemas:                     # inline schemas, merged over schema_dir
//!   BodyDto:
//!     type: object
//!     properties:
//!       name: { type: string, format: email }
//! options:
//!   whitelist: true
//! methods:
//!   UserService::create:
//!     - type: BodyDto
//!       validate: true
//!     - type: any
//!     - type: "BodyDto[]"
//!       validate: { path: items, schema: BodyDto }
//! ```
//!
//! `validate` is `true`, `false`, or a mapping with optional `path` and
//! `schema`. A mapping flags the parameter either way; the override only
//! takes effect when both keys are present.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use paramguard_core::{GuardError, SchemaId};
use paramguard_schema::{JsonSchemaBridge, SchemaStore, ValidatorOptions};
use serde::Deserialize;
use serde_json::Value;

use crate::declared::DeclaredType;
use crate::interceptor::Interceptor;
use crate::registry::{ParamRegistration, ParamRegistry};
use crate::signature::MethodSignature;

/// Parsed guard manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardManifest {
    /// Directory of `<Name>.schema.json` files.
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
    /// Inline schemas keyed by name.
    #[serde(default)]
    pub schemas: BTreeMap<String, Value>,
    /// Options forwarded to the validation bridge.
    #[serde(default)]
    pub options: ValidatorOptions,
    /// Parameters of each method, in position order.
    #[serde(default)]
    pub methods: BTreeMap<String, Vec<ParamEntry>>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// One parameter of a manifest method.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    /// Declared type: a schema name, `Name[]`, or `any`.
    #[serde(rename = "type", default)]
    pub declared: Option<String>,
    /// Whether and how the parameter is validated.
    #[serde(default)]
    pub validate: Validate,
}

/// The `validate` key of a [`ParamEntry`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Validate {
    /// `true` validates the raw argument; `false` skips the parameter.
    Flag(bool),
    /// Validate the value at `path` against `schema`.
    Target(ValidateTarget),
}

/// Mapping form of `validate`. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidateTarget {
    /// Dotted path within the argument.
    #[serde(default)]
    pub path: Option<String>,
    /// Schema replacing the declared type.
    #[serde(default)]
    pub schema: Option<String>,
}

impl Default for Validate {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl GuardManifest {
    /// Read and parse a manifest file. A relative `schema_dir` is resolved
    /// against the manifest's directory.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Manifest` if the file cannot be read or is not a
    /// valid manifest.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GuardError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GuardError::Manifest {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        let mut manifest = Self::from_yaml_str(&content).map_err(|e| match e {
            GuardError::Manifest { reason, .. } => GuardError::Manifest {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(
            path = %path.display(),
            methods = manifest.methods.len(),
            "loaded guard manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from YAML text. A relative `schema_dir` is resolved
    /// against the working directory.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Manifest` if the text is not a valid manifest.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GuardError> {
        serde_yaml::from_str(yaml).map_err(|e| GuardError::Manifest {
            path: "<inline>".to_string(),
            reason: format!("invalid manifest: {e}"),
        })
    }

    /// Resolved schema directory, if one is configured.
    pub fn resolved_schema_dir(&self) -> Option<PathBuf> {
        let dir = self.schema_dir.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir.clone(),
        })
    }

    /// Build the schema store: `schema_dir` first, then inline schemas.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::SchemaLoad` if the schema directory cannot be
    /// loaded.
    pub fn schema_store(&self) -> Result<SchemaStore, GuardError> {
        let mut store = match self.resolved_schema_dir() {
            Some(dir) => SchemaStore::from_dir(dir)?,
            None => SchemaStore::new(),
        };
        for (name, schema) in &self.schemas {
            store.insert(name.clone(), schema.clone());
        }
        Ok(store)
    }

    /// One [`MethodSignature`] per manifest method.
    pub fn signatures(&self) -> Vec<MethodSignature> {
        self.methods
            .iter()
            .map(|(method, params)| {
                params
                    .iter()
                    .fold(MethodSignature::new(method.as_str()), |signature, entry| {
                        let declared = entry
                            .declared
                            .as_deref()
                            .unwrap_or_default()
                            .parse::<DeclaredType>()
                            .unwrap_or_default();
                        match &entry.validate {
                            Validate::Flag(false) => signature.param(declared),
                            Validate::Flag(true) => signature.validated(declared),
                            Validate::Target(ValidateTarget { path, schema }) => signature
                                .registered(
                                    declared,
                                    ParamRegistration {
                                        position: 0,
                                        target_path: path.clone(),
                                        validator_schema: schema.as_deref().map(SchemaId::from),
                                    },
                                ),
                        }
                    })
            })
            .collect()
    }

    /// Registry holding every manifest method.
    pub fn registry(&self) -> ParamRegistry {
        self.signatures()
            .into_iter()
            .fold(ParamRegistry::new(), ParamRegistry::with)
    }

    /// Assemble a checked interceptor: load schemas, compile them, build the
    /// registry, verify every referenced schema exists, and apply options.
    ///
    /// # Errors
    ///
    /// Returns any schema load, validator build, or unknown-schema error.
    pub fn interceptor(&self) -> Result<Interceptor<JsonSchemaBridge>, GuardError> {
        let bridge = Arc::new(JsonSchemaBridge::new(self.schema_store()?)?);
        let interceptor = Interceptor::checked(Arc::new(self.registry()), bridge)?;
        Ok(interceptor.with_options(self.options.clone()))
    }
}
