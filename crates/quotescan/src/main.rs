//! quotescan: OCR procurement-quote screenshots into structured records.

mod cli;
mod output;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    use output::Output;

    let output = Output::new(cli.json);

    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, &output).await,
        Commands::Extract(args) => cli::commands::extract::run(args, &output),
        Commands::Upload(args) => cli::commands::upload::run(args, &output).await,
        Commands::Serve(args) => cli::commands::serve::run(args).await,
    }
}
