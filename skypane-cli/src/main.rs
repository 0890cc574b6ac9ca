//! Binary crate for the `skypane` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and picking a location
//! - The interactive session with its unit toggle
//! - Output as terminal text, an HTML page, or JSON

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skypane_core=info,skypane=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
