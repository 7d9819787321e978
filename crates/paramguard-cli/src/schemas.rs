//! # Schemas Subcommand
//!
//! Lists the schemas in a directory after compiling them, so broken
//! schemas or dangling `$ref`s surface before a guard is deployed.

use std::path::PathBuf;

use clap::Args;
use paramguard_schema::{JsonSchemaBridge, SchemaStore};

/// Arguments for the schemas subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Directory of `<Name>.schema.json` files.
    #[arg(long)]
    pub dir: PathBuf,
}

/// Load and compile every schema in the directory, returning their names.
///
/// # Errors
///
/// Fails if the directory cannot be read or any schema does not compile.
pub fn run(args: &SchemasArgs) -> anyhow::Result<Vec<String>> {
    let store = SchemaStore::from_dir(&args.dir)?;
    let bridge = JsonSchemaBridge::new(store)?;
    let names: Vec<String> = bridge
        .store()
        .names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    tracing::info!(dir = %args.dir.display(), count = names.len(), "schemas compiled");
    Ok(names)
}
