mod api_client;
mod cli;
mod config;
mod errors;
mod feedback;
mod models;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::cli::{Args, Outcome};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the rendered result only
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Currículo AI v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Backend: {} (timeout {}s)",
        config.api_base_url, config.api_timeout_secs
    );

    let client = ApiClient::new(&config)?;
    let outcome = cli::run(&client, &args, &mut std::io::stdout()).await?;

    Ok(match outcome {
        Outcome::Failed => ExitCode::FAILURE,
        Outcome::Analyzed | Outcome::DocumentSaved(_) | Outcome::Unexpected => ExitCode::SUCCESS,
    })
}
