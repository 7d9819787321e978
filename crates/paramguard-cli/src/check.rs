//! # Check Subcommand
//!
//! Validates one recorded call against a guard manifest, as the
//! interceptor would before running the method.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use paramguard_core::{MethodId, ValidationFailure, Violation};
use paramguard_intercept::GuardManifest;
use serde::Serialize;
use serde_json::Value;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the guard manifest (YAML).
    #[arg(long)]
    pub manifest: PathBuf,

    /// Method name as registered in the manifest.
    #[arg(long)]
    pub method: String,

    /// JSON file holding the call's arguments as an array. A non-array
    /// document is treated as a single argument.
    #[arg(long)]
    pub args: PathBuf,
}

/// Result of checking one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// `"ok"` or `"Validation Error"`.
    pub message: String,
    /// Violations collected for the call.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<Violation>,
}

impl CheckReport {
    /// Returns true if the call passed validation.
    pub fn passed(&self) -> bool {
        self.validation_errors.is_empty()
    }

    /// The failure to show a human reader, if the call did not pass.
    pub fn failure(&self) -> Option<ValidationFailure> {
        if self.passed() {
            None
        } else {
            Some(ValidationFailure::new(self.validation_errors.clone()))
        }
    }
}

/// Run the check subcommand.
///
/// # Errors
///
/// Fails if the manifest or argument file cannot be loaded, or the
/// manifest references unknown schemas. A call that fails validation is
/// not an error; it is reported in the returned [`CheckReport`].
pub fn run(args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let manifest = GuardManifest::from_path(&args.manifest)?;
    let interceptor = manifest.interceptor()?;
    let call_args = load_call_args(&args.args)?;

    let method = MethodId::new(args.method.as_str());
    if interceptor.registry().method(&method).is_none() {
        tracing::warn!(%method, "method not in manifest; call passes unchecked");
    }

    let report = match interceptor.check(&method, &call_args) {
        Ok(()) => CheckReport {
            message: "ok".to_string(),
            validation_errors: Vec::new(),
        },
        Err(failure) => CheckReport {
            message: failure.to_string(),
            validation_errors: failure.into_violations(),
        },
    };
    tracing::info!(%method, passed = report.passed(), "checked call");
    Ok(report)
}

fn load_call_args(path: &Path) -> anyhow::Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read arguments file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    Ok(match value {
        Value::Array(items) => items,
        single => vec![single],
    })
}
