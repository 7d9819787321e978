//! # paramguard CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// paramguard: declarative argument validation.
///
/// Checks recorded calls against guard manifests and inspects schema
/// directories.
#[derive(Parser, Debug)]
#[command(name = "paramguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a recorded call against a guard manifest.
    Check(paramguard_cli::check::CheckArgs),
    /// List and compile the schemas in a directory.
    Schemas(paramguard_cli::schemas::SchemasArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            let report = paramguard_cli::check::run(&args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            match report.failure() {
                Some(failure) => {
                    eprintln!("{}", failure.report());
                    Ok(ExitCode::FAILURE)
                }
                None => Ok(ExitCode::SUCCESS),
            }
        }
        Commands::Schemas(args) => {
            for name in paramguard_cli::schemas::run(&args)? {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
