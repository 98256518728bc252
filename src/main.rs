mod cli;
mod document;
mod error;
mod extract;
mod ingest;
mod record;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Usage errors exit 1 like every other failure, not clap's default 2.
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "add_game=info" } else { "add_game=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &cli::Cli) -> Result<()> {
    let row = ingest::ingest(cli)
        .with_context(|| format!("failed to import {}", cli.json_path.display()))?;

    tracing::info!(
        appid = row.appid,
        name = %row.name,
        image_url = %row.image_url,
        category = row.category,
        "inserted custom game"
    );
    Ok(())
}
