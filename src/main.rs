//! Transaction Analyzer main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use txanalyzer_api::start_server;
use txanalyzer_config::{Config, ConfigError};
use txanalyzer_core::{FormController, HttpAnalysisClient};

#[derive(Parser, Debug)]
#[command(name = "txanalyzer")]
#[command(author = "Transaction Analyzer Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Web form for submitting transactions to an anomaly analysis service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: PathBuf) -> anyhow::Result<(Config, Option<ConfigError>)> {
    match Config::load(path) {
        Ok(config) => Ok((config, None)),
        Err(e @ ConfigError::FileNotFound { .. }) => Ok((Config::default(), Some(e))),
        Err(e) => Err(anyhow::anyhow!("{}", e.to_details())),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = load_config(args.config.clone())
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Some(e) = missing {
        log::warn!("{}; using built-in defaults", e);
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }

    let client = HttpAnalysisClient::new(&config.analysis)
        .context("Failed to create analysis service client")?;
    log::info!("Analysis endpoint: {}", client.endpoint_url());

    let form = FormController::new(Arc::new(client), config.form.report_failures);
    if !config.form.report_failures {
        log::info!("Failure reporting disabled; failed submissions are only logged");
    }

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, form))
        .context("Server error")?;

    Ok(())
}
