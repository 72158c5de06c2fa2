//! probestat - DNS and ping reachability survey
//!
//! Binary entry point for the probestat CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use probestat::cli::OutputFormat;
use probestat::config::ProbeConfig;
use probestat::error::Result;
use probestat::probe::{self, generator, SystemBackend};
use probestat::{pause, report};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up logging based on verbosity level.
///
/// Logs go to stderr so the report on stdout stays clean.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Enable error-level only logging
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Generate targets, probe them all and print the report.
///
/// # Arguments
///
/// * `config` - Probe settings
/// * `format` - Output format
async fn run_probe(config: &ProbeConfig, format: OutputFormat) -> Result<()> {
    config.validate()?;

    let targets = generator::random_targets(&mut rand::rng(), config)?;
    let backend = Arc::new(SystemBackend::new(config)?);

    tracing::info!("probing {} targets", targets.len());
    let batch = probe::run_batch(backend, targets, config).await;

    if batch.failed_tasks > 0 {
        tracing::warn!("{} probe tasks failed and are missing", batch.failed_tasks);
    }

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Table => report::write_table(&mut stdout, &batch),
        OutputFormat::Json => report::write_json(&mut stdout, &batch),
    }
}

/// Main entry point for the probestat CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = probestat::cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    tracing::debug!("probestat starting...");

    let config = ProbeConfig::default();
    run_probe(&config, cli.format).await?;

    if !cli.no_pause {
        tokio::task::spawn_blocking(pause::wait_for_key).await??;
    }

    Ok(())
}
