mod cli;
mod config;
mod drive;
mod error;
mod models;
mod session;
mod sheets;

use clap::Parser;

use crate::cli::Cli;
use indicatif::ProgressStyle;
use tracing::error;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Spinners for in-flight API calls; log lines go through the same stderr writer
    let spinner_style =
        ProgressStyle::with_template("{span_child_prefix}{spinner:.cyan} {span_name} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style);

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}
