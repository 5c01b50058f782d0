// stagehand/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug stagehand run ... pour voir les détails
    tracing_subscriber::fmt::init();

    let args = Cli::parse();

    // 2. Dispatch to the Use Cases
    match args.command {
        Commands::Run { flow_dir } => commands::run::execute(flow_dir).await,
        Commands::Plan { flow_dir } => commands::plan::execute(flow_dir),
        Commands::Render { flow_dir, step } => commands::render::execute(flow_dir, step),
    }
}
