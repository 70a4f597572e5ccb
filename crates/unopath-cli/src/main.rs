//! CLI entry point - the composition root.
//!
//! Applies `-D` definitions to the process property store, builds the finder,
//! and runs the selected handler on the blocking pool while Ctrl-C cancels it.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use unopath_cli::runner::run_cancellable;
use unopath_cli::{Cli, CliError, Commands, handlers};
use unopath_core::{InstallationFinder, set_property};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_finder(cli: &Cli, cancel: CancellationToken) -> Result<InstallationFinder, CliError> {
    for (key, value) in &cli.defines {
        set_property(key, value).map_err(|e| CliError::Arguments(e.to_string()))?;
        debug!(key = %key, value = %value, "Property defined");
    }
    Ok(InstallationFinder::new(cli.discovery_config())?.with_cancellation(cancel))
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.clone() else {
        Cli::command()
            .print_help()
            .map_err(|e| CliError::Output(e.to_string()))?;
        return Ok(());
    };

    match command {
        Commands::DecodeUrl { url } => handlers::decode_url::execute(&url),
        Commands::Find => {
            let cancel = CancellationToken::new();
            let finder = build_finder(&cli, cancel.clone())?;
            run_cancellable(cancel, move || handlers::find::execute(&finder)).await
        }
        Commands::Explain { json } => {
            let cancel = CancellationToken::new();
            let finder = build_finder(&cli, cancel.clone())?;
            run_cancellable(cancel, move || handlers::explain::execute(&finder, json)).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            let code = u8::try_from(e.exit_code()).unwrap_or(1);
            Ok(ExitCode::from(code))
        }
    }
}
