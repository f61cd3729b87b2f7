//! bankerd: the Banker's Algorithm analysis service.
//!
//! Serves the validation and comparison API over HTTP, or runs the same
//! analysis offline against scenario JSON files.
//!
//! # Usage
//!
//! ```text
//! bankerd serve --config bankerd.toml --bind 0.0.0.0:8001
//! bankerd validate scenario.json --format json
//! bankerd compare before.json after.json
//! bankerd diff before.json after.json
//! bankerd config --config bankerd.toml
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::Format;
use config::{BankerdConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "bankerd",
    about = "Banker's Algorithm scenario analysis service",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Path to bankerd.toml.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on (overrides the config file).
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Allowed CORS origin; repeat for several (overrides config and env).
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Path to bankerd.toml.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Detect mistakes in a scenario file. Exits 1 if any error is found.
    Validate {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
        /// Print the pass/fail summary instead of the issue list.
        #[arg(long)]
        summary: bool,
    },
    /// Compare two scenario files.
    Compare {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Cell-wise diff of two equally sized scenario files.
    Diff {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn init_tracing(default_filter: &str, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            bind,
            cors_origins,
        } => {
            let mut config = BankerdConfig::load(config.as_deref())?;
            config.apply_cors_env(std::env::var("CORS_ORIGINS").ok().as_deref());
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if !cors_origins.is_empty() {
                config.server.cors_origins = cors_origins;
            }

            init_tracing(&config.logging.filter, config.logging.format);
            serve(config).await
        }
        Command::Config { config } => {
            let mut config = BankerdConfig::load(config.as_deref())?;
            config.apply_cors_env(std::env::var("CORS_ORIGINS").ok().as_deref());
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        Command::Validate {
            file,
            format,
            summary,
        } => {
            init_tracing("warn", LogFormat::Text);
            if !commands::validate(&file, format, summary)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Compare { a, b, format } => {
            init_tracing("warn", LogFormat::Text);
            commands::compare(&a, &b, format)
        }
        Command::Diff { a, b, format } => {
            init_tracing("warn", LogFormat::Text);
            commands::diff(&a, &b, format)
        }
    }
}

async fn serve(config: BankerdConfig) -> anyhow::Result<()> {
    info!("banker analysis service starting");

    let router = banker_api::build_router(
        banker_api::ApiState::default(),
        &config.server.cors_origins,
    );

    let addr = config.server.bind;
    info!(%addr, origins = ?config.server.cors_origins, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("banker analysis service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
