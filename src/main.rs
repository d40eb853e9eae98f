// LoopOptimizer Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use loop_optimizer::config::ServiceConfig;
use loop_optimizer::optimizer::{LoopOptimizer, OptionOverrides, SimulatedRemote};
use loop_optimizer::scene;
use loop_optimizer::server;
use loop_optimizer::state::ServiceState;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loop-optimizer")]
#[command(about = "Animation loop optimizer and scene validation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on (overrides LOOP_OPTIMIZER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Optimize an animation stored as JSON
    Optimize {
        /// Input animation JSON
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quality level 1-10
        #[arg(short, long)]
        quality: Option<u8>,

        /// Keep repetitive frames
        #[arg(long)]
        no_compression: bool,

        /// Simulated remote latency in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the analysis report for an animation
    Analyze {
        /// Input animation JSON
        input: PathBuf,
    },

    /// Validate a scene description
    ValidateScene {
        /// Scene JSON file
        input: PathBuf,

        /// Write the results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Gemini API key (defaults to GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServiceConfig::from_env();
    let args = Cli::parse();

    match args.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let optimizer = LoopOptimizer::new(
                config.default_options.clone(),
                SimulatedRemote::new(config.remote_delay),
            );
            let state = Arc::new(ServiceState::new(optimizer));
            info!("Starting LoopOptimizer API on port {}...", port);
            server::start_server(port, state).await?;
        }
        Commands::Optimize {
            input,
            output,
            quality,
            no_compression,
            delay_ms,
        } => {
            let animation = read_json(&input)?;
            let delay = delay_ms.map(Duration::from_millis).unwrap_or(config.remote_delay);
            let optimizer = LoopOptimizer::new(config.default_options, SimulatedRemote::new(delay));
            let overrides = OptionOverrides {
                quality,
                enable_compression: no_compression.then_some(false),
                ..OptionOverrides::default()
            };
            let result = optimizer.optimize_loop(&animation, Some(&overrides)).await?;
            emit(&result, output.as_deref())?;
        }
        Commands::Analyze { input } => {
            let animation = read_json(&input)?;
            let optimizer = LoopOptimizer::new(config.default_options, SimulatedRemote::default());
            let report = optimizer.analyze(&animation)?;
            emit(&report, None)?;
        }
        Commands::ValidateScene {
            input,
            output,
            api_key,
        } => {
            let results = scene::validate_from_file(&input, api_key.or(config.gemini_api_key));
            emit(&results, output.as_deref())?;
            std::process::exit(if results.valid { 0 } else { 1 });
        }
    }

    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {:?}", path))
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Results written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
