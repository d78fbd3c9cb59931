use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{MinutesConfig, DEFAULT_API_BASE_URL};
use crate::errors::{MinutesError, MinutesResult};
use crate::schema::single_function_tool;
use crate::types::*;

/// Anything that can answer a `generateContent` request.
///
/// `GeminiClient` talks to the real API; tests substitute canned responses.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> MinutesResult<GenerateContentResponse>;
}

/// Client for interacting with the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: GeminiModel,
}

impl GeminiClient {
    /// Create a new Gemini API client
    pub fn new(config: &MinutesConfig) -> MinutesResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            MinutesError::ConfigError(
                "API key is required to initialize the Gemini client".to_string(),
            )
        })?;

        let model = GeminiModel::new(api_key, config.model_name.clone());
        let base_url = config
            .api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model.model_name
    }

    /// Get the generateContent URL for the configured model
    fn get_generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model.model_name, self.model.api_key
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> MinutesResult<GenerateContentResponse> {
        let url = self.get_generate_url();
        debug!(model = %self.model.model_name, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| MinutesError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                MinutesError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(MinutesError::HttpError {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", error_body),
            });
        }

        let response_body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| MinutesError::ParsingError(format!("Failed to parse response: {}", e)))?;

        Ok(response_body)
    }
}

/// Build a single-turn request constrained to one function declaration.
pub fn function_call_request(
    parts: Vec<Part>,
    system_instruction: &str,
    declaration: FunctionDeclaration,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts,
            role: Some("user".to_string()),
        }],
        system_instruction: Some(Content {
            parts: vec![Part::text(system_instruction.to_string())],
            role: None,
        }),
        tools: Some(single_function_tool(declaration)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{analyze_function, SECRETARY_INSTRUCTION};

    #[test]
    fn client_requires_api_key() {
        let result = GeminiClient::new(&MinutesConfig::defaults());
        assert!(matches!(result, Err(MinutesError::ConfigError(_))));
    }

    #[test]
    fn url_uses_configured_model_and_base() {
        let config = MinutesConfig {
            api_key: Some("secret".to_string()),
            model_name: Some("gemini-2.0-flash".to_string()),
            api_base_url: Some("http://localhost:9000/v1beta/".to_string()),
            ..MinutesConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.model_name(), "gemini-2.0-flash");
        assert_eq!(
            client.get_generate_url(),
            "http://localhost:9000/v1beta/models/gemini-2.0-flash:generateContent?key=secret"
        );
    }

    #[test]
    fn default_model_applies_without_override() {
        let config = MinutesConfig {
            api_key: Some("secret".to_string()),
            ..MinutesConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.model_name(), DEFAULT_MODEL);
    }

    #[test]
    fn function_call_request_shape() {
        let request = function_call_request(
            vec![Part::text("notes".to_string())],
            SECRETARY_INSTRUCTION,
            analyze_function(),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "notes");
        assert_eq!(value["system_instruction"]["parts"][0]["text"], SECRETARY_INSTRUCTION);
        assert_eq!(
            value["tools"][0]["function_declarations"][0]["name"],
            "analyze_meeting_notes"
        );
    }
}
