//! # paramguard-cli — Command-Line Interface
//!
//! ## Subcommands
//!
//! - `check`: validate a recorded call (a JSON array of arguments)
//!   against a guard manifest, printing the outcome as JSON.
//! - `schemas`: list the schemas a directory provides and confirm they
//!   compile.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; `main.rs` only
//!   dispatches.
//! - Handlers delegate to the library crates and return `anyhow::Result`.

pub mod check;
pub mod schemas;
