//! Test doubles shared by the unit tests of this crate.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use crate::client::ContentGenerator;
use crate::errors::{MinutesError, MinutesResult};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Replays one canned response and records every request it receives.
pub(crate) struct FakeGenerator {
    response: Value,
    fail_with_status: Option<u16>,
    pub requests: Mutex<Vec<Value>>,
}

impl FakeGenerator {
    pub fn responding(response: Value) -> Self {
        Self {
            response,
            fail_with_status: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Response whose first candidate carries the given function calls
    pub fn with_calls(calls: Vec<(&str, Value)>) -> Self {
        let parts: Vec<Value> = calls
            .into_iter()
            .map(|(name, args)| json!({ "functionCall": { "name": name, "args": args } }))
            .collect();
        Self::responding(json!({
            "candidates": [ { "content": { "role": "model", "parts": parts } } ]
        }))
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: Value::Null,
            fail_with_status: Some(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Value {
        self.requests.lock().unwrap().last().cloned().unwrap_or(Value::Null)
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> MinutesResult<GenerateContentResponse> {
        let request = serde_json::to_value(&request)
            .map_err(|e| MinutesError::ParsingError(e.to_string()))?;
        self.requests.lock().unwrap().push(request);

        if let Some(status_code) = self.fail_with_status {
            return Err(MinutesError::HttpError {
                status_code,
                message: "API request failed: upstream unavailable".to_string(),
            });
        }
        serde_json::from_value(self.response.clone())
            .map_err(|e| MinutesError::ParsingError(e.to_string()))
    }
}
