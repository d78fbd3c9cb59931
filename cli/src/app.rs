use anyhow::{anyhow, bail, Context, Result};
use minutes_core::data_uri::{encode_data_uri, image_mime_type};
use minutes_core::{
    validate_analysis_input, validate_input, MeetingAnalysis, NotesAnalyzer, TaskSummarizer,
};
use minutes_records::MeetingRecords;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::RecordsCommand;
use crate::output::{format_analysis, format_record_list, format_task_result};

/// Resolve notes from the positional argument, `-` for stdin, or a file
pub async fn read_notes(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(path) = file {
        return tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    match text {
        Some(text) if text == "-" => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read notes from stdin")?;
            Ok(buffer)
        }
        Some(text) => Ok(text),
        None => Ok(String::new()),
    }
}

/// Read an image file and encode it as a data URI
pub async fn read_image(path: &Path) -> Result<String> {
    let mime_type = image_mime_type(path)
        .ok_or_else(|| anyhow!("Unsupported image type: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    debug!(bytes = bytes.len(), mime_type, "Encoded image");
    Ok(encode_data_uri(mime_type, &bytes))
}

/// Validate, analyze, print, and optionally save
pub async fn run_analyze(
    analyzer: &dyn NotesAnalyzer,
    records: &MeetingRecords,
    content: &str,
    image_uri: Option<&str>,
    save: bool,
    json: bool,
) -> Result<MeetingAnalysis> {
    validate_analysis_input(content, image_uri)?;

    info!(strategy = analyzer.strategy_name(), "Analyzing notes");
    let analysis = analyzer.analyze(content, image_uri).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_analysis(&analysis));
    }

    if save {
        let record = records.save(analysis.clone()).await?;
        eprintln!("Saved at {}", record.saved_at);
    }
    Ok(analysis)
}

pub async fn run_summarize(summarizer: &dyn TaskSummarizer, text: &str, json: bool) -> Result<()> {
    validate_input(text)?;

    let result = summarizer.summarize(text).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_task_result(&result));
    }
    Ok(())
}

pub async fn run_records(records: &MeetingRecords, action: RecordsCommand) -> Result<()> {
    match action {
        RecordsCommand::List => {
            let list = records.list().await?;
            print!("{}", format_record_list(&list));
        }
        RecordsCommand::Show { index } => {
            let record = records.get(index).await?;
            println!("Saved at {}\n", record.saved_at);
            print!("{}", format_analysis(&record.analysis));
        }
        RecordsCommand::Delete { index } => {
            let removed = records.delete(index).await?;
            println!("Deleted \"{}\"", removed.analysis.title);
        }
        RecordsCommand::Edit { index, from } => {
            let raw = tokio::fs::read_to_string(&from)
                .await
                .with_context(|| format!("Failed to read {}", from.display()))?;
            let edited: MeetingAnalysis = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid analysis", from.display()))?;
            if edited.title.trim().is_empty() {
                bail!("Edited analysis needs a title");
            }
            let record = records.update(index, edited).await?;
            println!("Updated \"{}\"", record.analysis.title);
        }
    }
    Ok(())
}
