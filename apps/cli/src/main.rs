//! artifactview CLI — GitHub Actions artifact viewer.
//!
//! Fetches every artifact of one workflow run, unpacks them into a local
//! directory, and serves that directory with an external static file server.

mod clipboard;
mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
