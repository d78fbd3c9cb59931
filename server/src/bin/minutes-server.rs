use anyhow::{Context, Result};
use clap::Parser;
use minutes_core::config::MinutesConfig;
use minutes_core::{analyzer_from_config, summarizer_from_config};
use minutes_records::{FileKeyValueStore, MeetingRecords};
use minutes_server::config::AppConfig;
use minutes_server::http_server::{self, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "minutes-server", about = "HTTP server for the meeting-notes assistant", version)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP server address
    #[arg(long, env = "MINUTES_HTTP_ADDR", default_value = "127.0.0.1:3000")]
    http_addr: SocketAddr,

    /// Gemini API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'o', long)]
    model: Option<String>,

    /// Serve canned results instead of calling Gemini
    #[arg(long)]
    dummy: bool,

    /// Directory for saved meeting records
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MINUTES_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();

    info!("Starting minutes server");

    let mut config = AppConfig::load(args.config.as_deref(), args.http_addr)?;

    // Update config from CLI args
    let overrides = MinutesConfig {
        api_key: args.api_key,
        model_name: args.model,
        use_dummy_ai: args.dummy.then_some(true),
        data_dir: args.data_dir,
        ..MinutesConfig::default()
    };
    config = AppConfig::from_minutes(config.minutes.merge(&overrides), config.http_addr)?;

    let analyzer = analyzer_from_config(&config.minutes).context("Failed to initialize analyzer")?;
    let summarizer =
        summarizer_from_config(&config.minutes).context("Failed to initialize summarizer")?;
    if config.minutes.dummy_mode() {
        warn!("Dummy mode is on; responses are canned and no model is called");
    }
    info!(
        strategy = analyzer.strategy_name(),
        model = config.minutes.model_name.as_deref().unwrap_or_default(),
        "Initialized analyzer"
    );

    info!("Storing records in {}", config.record_dir.display());
    let store = Arc::new(FileKeyValueStore::new(config.record_dir.clone()));
    let records = Arc::new(MeetingRecords::new(store));

    let state = AppState::new(analyzer, summarizer, records);
    http_server::run_server(state, config.http_addr).await?;

    info!("Minutes server shutting down");
    Ok(())
}
