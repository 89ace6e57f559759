//! Spendlens main entry point

mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use spendlens_config::{Config, ConfigError, OutputFormat};
use spendlens_core::Dashboard;
use spendlens_ingest::JsonFileSource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "spendlens")]
#[command(author = "Spendlens Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Spending overview from an exported transaction list", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Transactions JSON export (overrides data.path)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of months in the monthly spending series
    #[arg(short, long)]
    months_back: Option<u32>,

    /// Last month of the monthly window, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    reference_date: Option<NaiveDate>,

    /// Output format: text or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, defaulted) = load_config(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if defaulted {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }
    log::info!(
        "Config loaded: data path={}, months_back={}",
        config.data.path.display(),
        config.analytics.months_back
    );

    let rt = Runtime::new().context("Failed to start tokio runtime")?;
    let output = rt.block_on(run(config))?;

    println!("{}", output);
    Ok(())
}

/// Load transactions and render the overview in the configured format
async fn run(config: Config) -> Result<String> {
    let format = config.output.format;
    let source = Arc::new(JsonFileSource::new(config.data.path.clone()));
    let dashboard = Dashboard::new(config, source)
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    dashboard
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .context("Failed to load transactions")?;

    let overview = dashboard
        .overview()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    match format {
        OutputFormat::Text => Ok(render::render_text(&overview, &dashboard.config().currency)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&overview).context("Failed to serialize overview")
        }
    }
}

/// Load the config file and apply command-line overrides
///
/// A missing file at the default path falls back to built-in defaults.
fn load_config(args: &Args) -> Result<(Config, bool)> {
    let (mut config, defaulted) = match Config::load(args.config.clone()) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. })
            if args.config == PathBuf::from(DEFAULT_CONFIG_PATH) =>
        {
            (Config::default(), true)
        }
        Err(e) => {
            return Err(anyhow::anyhow!("{}", e.to_details())
                .context(format!("Failed to load config {}", args.config.display())))
        }
    };

    if let Some(input) = &args.input {
        config.data.path = input.clone();
    }
    if let Some(months_back) = args.months_back {
        config.analytics.months_back = months_back;
    }
    if let Some(reference_date) = args.reference_date {
        config.analytics.reference_date = Some(reference_date);
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .context("Invalid command-line override")?;

    Ok((config, defaulted))
}
