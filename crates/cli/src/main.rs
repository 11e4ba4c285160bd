use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "codex-claim")]
#[command(about = "Hand out redemption codes from a spreadsheet member list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the claim HTTP API
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Serve from a JSON array of rows instead of Google Sheets
        #[arg(long)]
        memory_seed: Option<PathBuf>,
    },
    /// Show whether a member's code is still unclaimed, without claiming it
    Lookup {
        name: String,
        /// Read from a JSON array of rows instead of Google Sheets
        #[arg(long)]
        memory_seed: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, memory_seed } => {
            commands::serve::run(port, host, memory_seed).await?;
        },
        Commands::Lookup { name, memory_seed } => {
            commands::lookup::run(&name, memory_seed).await?;
        },
    }

    Ok(())
}
