//! VrISA CLI
//!
//! Command-line interface for the VrISA console core.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::info;

use vrisa::api::{AppState, HttpServer};

/// VrISA - Environmental Monitoring Console
#[derive(Parser)]
#[command(name = "vrisa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VRISA_CONFIG")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the console API server
    Serve {
        /// HTTP API port (overrides the configuration file)
        #[arg(long, env = "VRISA_HTTP_PORT")]
        http_port: Option<u16>,

        /// Start with empty queues instead of the demo snapshot
        #[arg(long)]
        no_seed: bool,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Load configuration
    let config = match vrisa::Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Serve { http_port, no_seed } => run_serve(config, http_port, no_seed).await,
        Commands::Config => run_config(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_serve(
    config: vrisa::Config,
    http_port: Option<u16>,
    no_seed: bool,
) -> anyhow::Result<()> {
    let port = http_port.unwrap_or(config.server.http_port);
    let addr = format!("{}:{}", config.server.host, port);

    let state = if no_seed {
        AppState::new(config.directory)
    } else {
        AppState::seeded(config.directory)
    };

    info!("Starting VrISA console API on {}", addr);
    HttpServer::new(state).serve(&addr).await?;

    Ok(())
}

fn run_config(config: &vrisa::Config) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
