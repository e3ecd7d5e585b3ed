//! OpenAI-compatible chat-completions backend.
//!
//! Works against any service exposing the `/chat/completions` dialect
//! (OpenAI, DeepSeek, Moonshot, local gateways, ...).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifyError;

/// Chat completion request.
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Response format specification.
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Client for an OpenAI-compatible backend.
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiBackend {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Request a JSON-object completion and return the raw message text.
    pub async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ClassifyError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        debug!("Chat completion: model={}", model);

        let request = ApiRequest {
            model: model.to_string(),
            messages: vec![
                ApiMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ApiMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.1,
            max_tokens: 16384,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Api { status, message });
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(text)
    }
}
