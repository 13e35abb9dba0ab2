//! Recipe gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────┐
//!                   │                  RECIPE GATEWAY                  │
//!                   │                                                  │
//!  Client Request   │  ┌──────────┐   ┌───────────┐   ┌────────────┐   │
//!  ─────────────────┼─▶│   http   │──▶│ identity/ │──▶│    rpc     │───┼──▶ Supabase
//!                   │  │  server  │   │  recipe   │   │   client   │   │    /rest/v1/rpc/*
//!  Client Response  │  │          │◀──│ services  │◀──│            │◀──┼───
//!  ◀────────────────┼──│          │   └───────────┘   └────────────┘   │
//!                   │  └──────────┘                                    │
//!                   │                                                  │
//!                   │  config · observability · lifecycle              │
//!                   └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use recipe_gateway::config::{self, GatewayConfig};
use recipe_gateway::lifecycle::startup;
use recipe_gateway::observability;

#[derive(Parser)]
#[command(name = "recipe-gateway")]
#[command(about = "HTTP gateway to the recipe app's Supabase procedures", long_about = None)]
struct Args {
    /// TOML configuration file. Without it, defaults plus environment are used.
    #[arg(short, long, env = "RECIPE_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(args: &Args) -> Result<GatewayConfig, config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_from_env()?,
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the file, so it is not up yet.
            observability::init_logging(&Default::default());
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    observability::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        supabase_url = %config.supabase.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Gateway failed");
            ExitCode::FAILURE
        }
    }
}
