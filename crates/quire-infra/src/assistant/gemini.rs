//! Gemini-backed draft assistant.
//!
//! Talks to the `generateContent` REST endpoint. Drafts are requested with a
//! JSON response schema; the returned text is still validated before use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use quire_core::domain::Draft;
use quire_core::ports::{DraftAssistant, DraftError};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini connection configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key. `None` means the assistant is not configured.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// The key is read from `API_KEY`, then `GEMINI_API_KEY`. Blank values
    /// count as missing.
    pub fn from_env() -> Self {
        let api_key = ["API_KEY", "GEMINI_API_KEY"]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());

        Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentRequest {
    fn text(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: None,
        }
    }

    fn draft(prompt: String) -> Self {
        Self {
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: draft_schema(),
            }),
            ..Self::text(prompt)
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

fn draft_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" },
            "excerpt": { "type": "STRING" }
        },
        "required": ["title", "content", "excerpt"]
    })
}

fn draft_prompt(prompt: &str) -> String {
    format!(
        "Generate a blog post in Hebrew based on this prompt: {prompt}. \
         Return a JSON object with title, content (in HTML format), and a short excerpt. \
         Ensure the language is natural, elegant Hebrew."
    )
}

fn refine_prompt(content: &str, instruction: &str) -> String {
    format!(
        "I have this blog content in Hebrew: \"{content}\". \
         Please {instruction} in Hebrew. Return only the updated HTML content."
    )
}

/// Draft assistant backed by the Gemini API.
pub struct GeminiDraftAssistant {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiDraftAssistant {
    pub fn new(config: GeminiConfig) -> Self {
        if !config.is_configured() {
            tracing::warn!("Gemini API key not set; draft generation will be unavailable");
        }
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment configuration.
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<Option<String>, DraftError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| DraftError::Generation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DraftError::Generation(format!("{status}: {body}")));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DraftError::Generation(e.to_string()))?;

        Ok(body.text())
    }
}

#[async_trait]
impl DraftAssistant for GeminiDraftAssistant {
    async fn generate_draft(&self, prompt: &str) -> Result<Draft, DraftError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            DraftError::Configuration(
                "API key not found. Set API_KEY or GEMINI_API_KEY.".to_string(),
            )
        })?;

        tracing::debug!(model = %self.config.model, "Requesting draft");
        let request = GenerateContentRequest::draft(draft_prompt(prompt));
        let text = self
            .generate_content(api_key, &request)
            .await?
            .ok_or_else(|| {
                DraftError::Parse("response contained no text candidate".to_string())
            })?;

        Draft::parse(&text)
    }

    async fn refine_draft(&self, content: &str, instruction: &str) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return content.to_string();
        };

        let request = GenerateContentRequest::text(refine_prompt(content, instruction));
        match self.generate_content(api_key, &request).await {
            Ok(Some(refined)) => refined,
            Ok(None) => content.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Refine failed, keeping current content");
                content.to_string()
            }
        }
    }
}
