//! Categorization protocol client.
//!
//! Builds the classification request, dispatches it to the configured
//! backend, and remaps the tokenized response back to bookmark ids.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use marksort_core::Bookmark;

use crate::error::ClassifyError;
use crate::gemini::GeminiBackend;
use crate::openai::OpenAiBackend;
use crate::prompt::{user_message, SYSTEM_INSTRUCTION};
use crate::sanitize::compact;

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Classifier configuration.
#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    /// API credential. Required; checked before any network call.
    pub api_key: String,
    /// When set, an OpenAI-compatible chat-completion backend is used
    /// instead of the default generative backend.
    pub base_url: Option<String>,
    /// Model name override for either backend.
    pub model: Option<String>,
}

/// Result of a categorization run: bookmark id to category name, plus the
/// number of response tokens that matched nothing locally. Ids absent from
/// `assignments` keep their prior category when the caller applies the
/// mapping.
#[derive(Debug, Clone, Default)]
pub struct CategoryMapping {
    pub assignments: HashMap<String, String>,
    pub unmatched_tokens: usize,
}

/// Structured classifier response. Any shape mismatch on receipt is a
/// [`ClassifyError::MalformedResponse`], never a runtime type error.
#[derive(Debug, Deserialize)]
struct AiCategorization {
    categories: Vec<AiCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiCategory {
    category_name: String,
    bookmark_ids: Vec<String>,
}

/// Categorization protocol client.
pub struct Classifier {
    config: ClassifierConfig,
    http: Client,
    /// Override for the generative backend's endpoint, used in tests.
    gemini_base_url: Option<String>,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            http: Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
            gemini_base_url: None,
        }
    }

    /// Classify the batch and return an id-to-category mapping.
    ///
    /// No internal retries; every failure mode is surfaced as a distinct
    /// [`ClassifyError`] variant.
    pub async fn categorize(
        &self,
        bookmarks: &[Bookmark],
    ) -> Result<CategoryMapping, ClassifyError> {
        if self.config.api_key.trim().is_empty() {
            return Err(ClassifyError::MissingCredential);
        }

        let (records, token_to_id) = compact(bookmarks);
        let user = user_message(&records);

        let raw = match &self.config.base_url {
            Some(base_url) => {
                let model = self.config.model.as_deref().unwrap_or(OPENAI_MODEL);
                let backend =
                    OpenAiBackend::new(self.http.clone(), self.config.api_key.clone(), base_url.clone());
                backend.complete(model, SYSTEM_INSTRUCTION, &user).await?
            }
            None => {
                let model = self.config.model.as_deref().unwrap_or(GEMINI_MODEL);
                let backend = match &self.gemini_base_url {
                    Some(base) => GeminiBackend::with_base_url(
                        self.http.clone(),
                        self.config.api_key.clone(),
                        base.clone(),
                    ),
                    None => GeminiBackend::new(self.http.clone(), self.config.api_key.clone()),
                };
                backend.generate(model, SYSTEM_INSTRUCTION, &user).await?
            }
        };

        let parsed = parse_response(&raw)?;
        let mapping = remap(parsed, &token_to_id);

        info!(
            "Categorized {}/{} bookmarks",
            mapping.assignments.len(),
            bookmarks.len()
        );
        Ok(mapping)
    }
}

/// Strip an optional markdown code fence from the raw response text.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Validate the raw response text against the expected JSON shape.
fn parse_response(raw: &str) -> Result<AiCategorization, ClassifyError> {
    let text = strip_code_fence(raw);
    if text.is_empty() {
        return Err(ClassifyError::EmptyResponse);
    }
    serde_json::from_str(text).map_err(|e| ClassifyError::MalformedResponse(e.to_string()))
}

/// Flatten the categories into token assignments (last category wins on a
/// duplicated token) and map tokens back to bookmark ids. Tokens the model
/// invented are dropped, counted, and logged rather than surfaced as an
/// error: the remote model is not trusted to echo the input set exactly.
fn remap(parsed: AiCategorization, token_to_id: &HashMap<String, String>) -> CategoryMapping {
    let mut token_to_category = HashMap::new();
    for category in parsed.categories {
        for token in category.bookmark_ids {
            token_to_category.insert(token, category.category_name.clone());
        }
    }

    let mut mapping = CategoryMapping::default();
    for (token, category) in token_to_category {
        match token_to_id.get(&token) {
            Some(id) => {
                mapping.assignments.insert(id.clone(), category);
            }
            None => {
                debug!("Dropping unknown classifier token {:?}", token);
                mapping.unmatched_tokens += 1;
            }
        }
    }

    if mapping.unmatched_tokens > 0 {
        warn!(
            "Classifier response referenced {} unknown tokens; applied partially",
            mapping.unmatched_tokens
        );
    }
    mapping
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
