use anyhow::{Context, Result};
use clap::Parser;
use minutes_core::config::{load_layered, MinutesConfig};
use minutes_core::{analyzer_from_config, summarizer_from_config};
use minutes_records::{FileKeyValueStore, MeetingRecords};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

mod app;
mod cli;
mod logging;
mod output;

use crate::cli::{Args, Command};
use crate::logging::init_logging;
use crate::output::print_error;

const APP_NAME: &str = "minutes";

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env before reading config
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let overrides = MinutesConfig {
        use_dummy_ai: args.dummy.then_some(true),
        data_dir: args.data_dir.clone(),
        ..MinutesConfig::default()
    };
    let config = load_layered(args.config.as_deref(), APP_NAME)?.merge(&overrides);

    let record_dir = config
        .resolved_data_dir(APP_NAME)
        .context("Failed to resolve record directory")?;
    debug!("Using record directory {}", record_dir.display());
    let records = MeetingRecords::new(Arc::new(FileKeyValueStore::new(record_dir)));

    match args.command {
        Command::Analyze {
            text,
            file,
            image,
            save,
            json,
        } => {
            let content = app::read_notes(text, file).await?;
            let image_uri = match image {
                Some(path) => Some(app::read_image(&path).await?),
                None => None,
            };
            let analyzer = analyzer_from_config(&config)?;
            app::run_analyze(
                analyzer.as_ref(),
                &records,
                &content,
                image_uri.as_deref(),
                save,
                json,
            )
            .await?;
        }
        Command::Summarize { text, file, json } => {
            let text = app::read_notes(text, file).await?;
            let summarizer = summarizer_from_config(&config)?;
            app::run_summarize(summarizer.as_ref(), &text, json).await?;
        }
        Command::Records { action } => {
            app::run_records(&records, action).await?;
        }
    }
    Ok(())
}
