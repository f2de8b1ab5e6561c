mod cli;
mod config;
mod errors;
mod json_utils;
mod navigator;
mod prompt;

use anyhow::Result;
use cli::{Cli, Commands};
use prompt::TermPrompt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // init logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cli = <Cli as clap::Parser>::parse();
    let mut prompt = TermPrompt::new();

    match cli.command {
        Commands::Add(args) => cli::handle_add(args, &mut prompt).await,
        Commands::Copy(args) => cli::handle_copy(args, &mut prompt).await,
    }
}
