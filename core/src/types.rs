use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default Gemini model used for note analysis
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Helper struct to encapsulate model details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GeminiModel {
    pub api_key: String,
    pub model_name: String,
}

impl GeminiModel {
    pub fn new(api_key: String, model_name: Option<String>) -> Self {
        Self {
            api_key,
            model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

/// Function call from LLM response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(rename = "args", default)]
    pub arguments: Value,
}

/// Request to Gemini API to generate content
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

/// Tool definition for Gemini API
#[derive(Serialize, Debug, Clone)]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// Function declaration for Gemini API
#[derive(Serialize, Debug, Clone)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Value,
}

/// Content structure for requests
#[derive(Serialize, Clone, Debug, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Part structure for a piece of content
#[derive(Serialize, Clone, Debug, Deserialize, Default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: String) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }

    pub fn inline_data(data: InlineData) -> Self {
        Self {
            inline_data: Some(data),
            ..Self::default()
        }
    }
}

/// Binary payload sent inline with a request, base64 encoded
#[derive(Serialize, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Response from Gemini API
#[derive(Deserialize, Debug, Serialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate in the response
#[derive(Deserialize, Debug, Serialize)]
pub struct Candidate {
    pub content: Option<ContentResponsePart>,
    #[serde(rename = "finishReason", skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Content part in the response
#[derive(Deserialize, Debug, Serialize)]
pub struct ContentResponsePart {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
    pub role: Option<String>,
}

/// Part response from the API
#[derive(Deserialize, Debug, Serialize, Default)]
pub struct PartResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "functionCall", skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl GenerateContentResponse {
    /// Collect the function calls of the first candidate, in order
    pub fn function_calls(&self) -> Vec<FunctionCall> {
        let mut function_calls = Vec::new();

        if let Some(candidate) = self.candidates.first() {
            if let Some(content) = &candidate.content {
                for part in &content.parts {
                    if let Some(function_call) = &part.function_call {
                        function_calls.push(function_call.clone());
                    }
                }
            }
        }

        function_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_data_part_serializes_camel_case() {
        let part = Part::inline_data(InlineData {
            mime_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        });
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(
            value,
            json!({ "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } })
        );
    }

    #[test]
    fn function_calls_come_from_first_candidate_only() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "thinking" },
                            { "functionCall": { "name": "first", "args": { "a": 1 } } },
                            { "functionCall": { "name": "second", "args": {} } }
                        ]
                    },
                    "finishReason": "STOP"
                },
                {
                    "content": {
                        "parts": [ { "functionCall": { "name": "ignored", "args": {} } } ]
                    }
                }
            ]
        }))
        .unwrap();

        let calls = response.function_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "first");
        assert_eq!(calls[0].arguments, json!({ "a": 1 }));
        assert_eq!(calls[1].name, "second");
    }

    #[test]
    fn response_without_candidates_has_no_calls() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert!(response.function_calls().is_empty());
    }
}
