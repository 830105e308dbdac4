//! `veo` – command-line front end for the generation relay.
//!
//! `veo generate` plays the part of the web page: compress reference images,
//! submit one request, then download or share the result. `veo models` asks
//! Vertex AI which video models the configured project can see.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{generate::GenerateArgs, models::ModelsArgs};

#[derive(Parser)]
#[command(name = "veo")]
#[command(about = "Generate videos with Google Veo through a veo-server relay")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a video from a prompt and up to three reference images
    Generate(GenerateArgs),

    /// List video-capable publisher models on Vertex AI
    Models(ModelsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args).await,
        Commands::Models(args) => commands::models::run(args).await,
    }
}
