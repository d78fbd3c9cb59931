//! Meeting-notes extraction.
//!
//! One `NotesAnalyzer` interface, two strategies: `DummyAnalyzer` returns a
//! fixed analysis without touching the network, `LiveAnalyzer` asks Gemini
//! for an `analyze_meeting_notes` function call and takes its arguments.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analysis::{ActionItem, MeetingAnalysis, Priority};
use crate::client::{function_call_request, ContentGenerator, GeminiClient};
use crate::config::MinutesConfig;
use crate::data_uri::parse_data_uri;
use crate::errors::{MinutesError, MinutesResult};
use crate::schema::{analyze_function, SECRETARY_INSTRUCTION};
use crate::types::Part;

/// Produces a `MeetingAnalysis` from notes text and/or an image data URI
#[async_trait]
pub trait NotesAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        content: &str,
        image_uri: Option<&str>,
    ) -> MinutesResult<MeetingAnalysis>;

    /// Short label for logs
    fn strategy_name(&self) -> &'static str;
}

/// Shared handle to an analyzer strategy
pub type NotesAnalyzerRef = Arc<dyn NotesAnalyzer>;

/// Canned analysis returned in dummy mode
pub fn demo_analysis() -> MeetingAnalysis {
    MeetingAnalysis {
        title: "デモ会議タイトル".to_string(),
        summary: "これはダミーの要約です。会議内容を簡潔にまとめています。"
            .to_string(),
        key_points: vec![
            "ダミーキーポイント1".to_string(),
            "ダミーキーポイント2".to_string(),
            "ダミーキーポイント3".to_string(),
        ],
        action_items: vec![
            ActionItem::new("ダミータスク1", Priority::High),
            ActionItem::new("ダミータスク2", Priority::Medium),
            ActionItem::new("ダミータスク3", Priority::Low),
        ],
    }
}

/// Offline strategy for demos and environments without credentials
#[derive(Debug, Clone, Default)]
pub struct DummyAnalyzer;

#[async_trait]
impl NotesAnalyzer for DummyAnalyzer {
    async fn analyze(
        &self,
        _content: &str,
        _image_uri: Option<&str>,
    ) -> MinutesResult<MeetingAnalysis> {
        debug!("Returning demo analysis");
        Ok(demo_analysis())
    }

    fn strategy_name(&self) -> &'static str {
        "dummy"
    }
}

/// Strategy backed by a schema-constrained model call
pub struct LiveAnalyzer<G> {
    generator: G,
    system_instruction: String,
}

impl<G: ContentGenerator> LiveAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            system_instruction: SECRETARY_INSTRUCTION.to_string(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    fn build_parts(content: &str, image_uri: Option<&str>) -> MinutesResult<Vec<Part>> {
        let mut parts = Vec::new();
        if !content.is_empty() {
            parts.push(Part::text(content.to_string()));
        }
        if let Some(uri) = image_uri.filter(|uri| !uri.is_empty()) {
            parts.push(Part::inline_data(parse_data_uri(uri)?));
        }
        Ok(parts)
    }
}

#[async_trait]
impl<G: ContentGenerator> NotesAnalyzer for LiveAnalyzer<G> {
    async fn analyze(
        &self,
        content: &str,
        image_uri: Option<&str>,
    ) -> MinutesResult<MeetingAnalysis> {
        let parts = Self::build_parts(content, image_uri)?;
        let request = function_call_request(parts, &self.system_instruction, analyze_function());

        let response = self.generator.generate_content(request).await?;
        let calls = response.function_calls();

        let Some(call) = calls.into_iter().next() else {
            warn!("Model answered without a structured function call");
            return Err(MinutesError::ExtractionFailed);
        };

        let analysis: MeetingAnalysis = serde_json::from_value(call.arguments).map_err(|e| {
            MinutesError::ParsingError(format!("Failed to read {} arguments: {}", call.name, e))
        })?;

        info!(
            action_items = analysis.action_items.len(),
            key_points = analysis.key_points.len(),
            "Extracted meeting analysis"
        );
        Ok(analysis)
    }

    fn strategy_name(&self) -> &'static str {
        "live"
    }
}

/// Pick the analyzer strategy the configuration asks for
pub fn analyzer_from_config(config: &MinutesConfig) -> MinutesResult<NotesAnalyzerRef> {
    if config.dummy_mode() {
        return Ok(Arc::new(DummyAnalyzer));
    }

    let client = GeminiClient::new(config)?;
    let mut analyzer = LiveAnalyzer::new(client);
    if let Some(prompt) = &config.system_prompt {
        analyzer = analyzer.with_system_instruction(prompt.clone());
    }
    Ok(Arc::new(analyzer))
}
