//! Gemini generateContent backend.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifyError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Content in a message.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// Generation configuration requesting a deterministic, JSON-only reply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: String,
}

/// JSON schema constraint for the categorization response.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "categoryName": { "type": "STRING" },
                        "bookmarkIds": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["categoryName", "bookmarkIds"]
                }
            }
        },
        "required": ["categories"]
    })
}

/// Client for the default generative backend.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, BASE_URL.to_string())
    }

    /// Create a backend against a custom endpoint (used in tests).
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Request a structured classification and return the raw response
    /// text of the first candidate.
    pub async fn generate(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ClassifyError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        debug!("Gemini generate_content: model={}", model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: user.to_string(),
                }],
            }],
            system_instruction: Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 16384,
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: 2048,
                }),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ClassifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}
