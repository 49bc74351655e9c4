//! HTTP client for Gemini-compatible `generateContent` endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AssistantSettings;
use crate::error::{EngineError, EngineResult};

use super::request::{AiRequest, ModelTier, Part, Role};
use super::service::AiService;

/// [`AiService`] backed by the Gemini REST API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    fast_model: String,
    pro_model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("fast_model", &self.fast_model)
            .field("pro_model", &self.pro_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl GeminiClient {
    /// Builds a client from settings, reading the API key from the environment.
    pub fn from_settings(settings: &AssistantSettings) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| EngineError::AiRequest {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self::with_client(client, settings, settings.api_key()))
    }

    /// Builds a client around a shared `reqwest::Client` and an explicit key.
    pub fn with_client(client: Client, settings: &AssistantSettings, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            fast_model: settings.fast_model.clone(),
            pro_model: settings.pro_model.clone(),
            api_key,
        }
    }

    fn model(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Pro => &self.pro_model,
        }
    }

    fn endpoint(&self, tier: ModelTier) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model(tier))
    }
}

#[async_trait]
impl AiService for GeminiClient {
    async fn generate(&self, request: &AiRequest) -> EngineResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| EngineError::AiRequest {
            message: "API key is not configured".to_string(),
        })?;

        let url = self.endpoint(request.tier);
        debug!(url = %url, turns = request.contents.len(), json = request.expects_json(), "Sending AI request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&WireRequest::from(request))
            .send()
            .await
            .map_err(|e| EngineError::AiRequest {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "AI service returned an error status");
            return Err(EngineError::AiRequest {
                message: format!("HTTP {status}: {body}"),
            });
        }

        let body: WireResponse = response.json().await.map_err(|e| EngineError::AiResponseParse {
            message: e.to_string(),
        })?;

        Ok(extract_text(&body))
    }
}

/// Concatenates the text parts of the first candidate.
///
/// An answer without candidates yields an empty string.
fn extract_text(response: &WireResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireSystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct WireContent {
    role: &'static str,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
struct WireSystemInstruction {
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum WirePart {
    #[serde(rename = "text")]
    Text(String),
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

impl From<&AiRequest> for WireRequest {
    fn from(request: &AiRequest) -> Self {
        let contents = request
            .contents
            .iter()
            .map(|content| WireContent {
                role: match content.role {
                    Role::User => "user",
                    Role::Model => "model",
                },
                parts: content.parts.iter().map(WirePart::from).collect(),
            })
            .collect();

        let system_instruction = request.system_instruction.as_ref().map(|text| WireSystemInstruction {
            parts: vec![WirePart::Text(text.clone())],
        });

        let generation_config = (request.temperature.is_some() || request.expects_json()).then(|| {
            WireGenerationConfig {
                temperature: request.temperature,
                response_mime_type: request.expects_json().then_some("application/json"),
                response_schema: request.response_schema.clone(),
            }
        });

        Self {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

impl From<&Part> for WirePart {
    fn from(part: &Part) -> Self {
        match part {
            Part::Text(text) => WirePart::Text(text.clone()),
            Part::Inline(attachment) => WirePart::InlineData {
                mime_type: attachment.mime_type.clone(),
                data: attachment.data.clone(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireResponseContent>,
}

#[derive(Debug, Deserialize)]
struct WireResponseContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
}
