//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatRole, ChatTurn, GenerativeModel, LlmConfig, LlmError};

/// Header carrying the API credential.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Handle to one Gemini model.
pub struct GeminiModel {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiModel {
    pub fn new(client: Client, config: &LlmConfig, api_key: &str, model: &str) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn generate_content(&self, contents: Vec<GeminiContent<'_>>) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents,
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        // The key travels in a header; reqwest errors quote the URL.
        let resp = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let gemini_resp: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.without_url().to_string()))?;

        if let Some(error) = gemini_resp.error {
            return Err(LlmError::Api(error.message));
        }

        let text: String = gemini_resp
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("Gemini {}: generate ({} chars)", self.model, prompt.len());
        self.generate_content(vec![GeminiContent {
            role: ChatRole::User.as_str(),
            parts: vec![GeminiPart { text: prompt }],
        }])
        .await
    }

    async fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, LlmError> {
        debug!(
            "Gemini {}: chat with {} prior turns ({} chars)",
            self.model,
            history.len(),
            message.len()
        );
        let contents = history
            .iter()
            .map(|turn| GeminiContent {
                role: turn.role.as_str(),
                parts: vec![GeminiPart { text: &turn.text }],
            })
            .chain(std::iter::once(GeminiContent {
                role: ChatRole::User.as_str(),
                parts: vec![GeminiPart { text: message }],
            }))
            .collect();

        self.generate_content(contents).await
    }
}
