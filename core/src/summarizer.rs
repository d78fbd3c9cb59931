//! The summarize flow: a looser `{summary, tasks}` contract.
//!
//! Unlike `NotesAnalyzer`, a response of the wrong shape is not an error
//! here; it is normalized to the empty `TaskResult`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::analysis::TaskResult;
use crate::client::{function_call_request, ContentGenerator, GeminiClient};
use crate::config::MinutesConfig;
use crate::errors::MinutesResult;
use crate::normalizer::normalize_task_result;
use crate::schema::{summarize_function, SUMMARIZER_INSTRUCTION};
use crate::types::Part;

#[async_trait]
pub trait TaskSummarizer: Send + Sync {
    /// Summarize already-validated text. Only transport failures are errors.
    async fn summarize(&self, text: &str) -> MinutesResult<TaskResult>;

    fn strategy_name(&self) -> &'static str;
}

pub type TaskSummarizerRef = Arc<dyn TaskSummarizer>;

/// Canned result returned in dummy mode
pub fn demo_task_result() -> TaskResult {
    TaskResult {
        summary: "要約（ダミー）".to_string(),
        tasks: vec!["タスク1".to_string(), "タスク2".to_string()],
    }
}

#[derive(Debug, Clone, Default)]
pub struct DummySummarizer;

#[async_trait]
impl TaskSummarizer for DummySummarizer {
    async fn summarize(&self, _text: &str) -> MinutesResult<TaskResult> {
        Ok(demo_task_result())
    }

    fn strategy_name(&self) -> &'static str {
        "dummy"
    }
}

pub struct LiveSummarizer<G> {
    generator: G,
}

impl<G: ContentGenerator> LiveSummarizer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl<G: ContentGenerator> TaskSummarizer for LiveSummarizer<G> {
    async fn summarize(&self, text: &str) -> MinutesResult<TaskResult> {
        let request = function_call_request(
            vec![Part::text(text.to_string())],
            SUMMARIZER_INSTRUCTION,
            summarize_function(),
        );

        let response = self.generator.generate_content(request).await?;
        let calls = response.function_calls();
        let args = calls.first().map(|call| &call.arguments);
        if args.is_none() {
            warn!("Summarize call returned no function call; using empty result");
        }

        let result = normalize_task_result(args);
        debug!(tasks = result.tasks.len(), "Summarized text");
        Ok(result)
    }

    fn strategy_name(&self) -> &'static str {
        "live"
    }
}

pub fn summarizer_from_config(config: &MinutesConfig) -> MinutesResult<TaskSummarizerRef> {
    if config.dummy_mode() {
        return Ok(Arc::new(DummySummarizer));
    }
    Ok(Arc::new(LiveSummarizer::new(GeminiClient::new(config)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MinutesError;
    use crate::testing::FakeGenerator;
    use serde_json::json;

    #[tokio::test]
    async fn dummy_returns_summary_and_tasks() {
        let result = DummySummarizer.summarize("テスト入力").await.unwrap();
        assert_eq!(result.summary, "要約（ダミー）");
        assert_eq!(result.tasks, vec!["タスク1", "タスク2"]);
    }

    #[tokio::test]
    async fn live_passes_through_well_formed_arguments() {
        let summarizer = LiveSummarizer::new(FakeGenerator::with_calls(vec![(
            "summarize_and_extract_tasks",
            json!({ "summary": "Release is on track.", "tasks": ["Tag v1.2", "Email QA"] }),
        )]));

        let result = summarizer.summarize("long text").await.unwrap();
        assert_eq!(result.summary, "Release is on track.");
        assert_eq!(result.tasks, vec!["Tag v1.2", "Email QA"]);

        let request = summarizer.generator.last_request();
        assert_eq!(request["contents"][0]["parts"][0]["text"], "long text");
        assert_eq!(
            request["tools"][0]["function_declarations"][0]["name"],
            "summarize_and_extract_tasks"
        );
    }

    #[tokio::test]
    async fn live_normalizes_bad_shapes() {
        let summarizer = LiveSummarizer::new(FakeGenerator::with_calls(vec![(
            "summarize_and_extract_tasks",
            json!({ "summary": ["wrong"], "tasks": "also wrong" }),
        )]));
        assert_eq!(summarizer.summarize("text").await.unwrap(), TaskResult::default());

        let silent = LiveSummarizer::new(FakeGenerator::with_calls(vec![]));
        assert_eq!(silent.summarize("text").await.unwrap(), TaskResult::default());
    }

    #[tokio::test]
    async fn transport_failure_is_still_an_error() {
        let summarizer = LiveSummarizer::new(FakeGenerator::failing(500));
        assert!(matches!(
            summarizer.summarize("text").await,
            Err(MinutesError::HttpError { status_code: 500, .. })
        ));
    }

    #[test]
    fn config_selects_strategy() {
        let dummy = MinutesConfig {
            use_dummy_ai: Some(true),
            ..MinutesConfig::default()
        };
        assert_eq!(summarizer_from_config(&dummy).unwrap().strategy_name(), "dummy");
        assert!(summarizer_from_config(&MinutesConfig::default()).is_err());
    }
}
