//! Provider-neutral AI requests.

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Which model class a request should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Low-latency model for chat and short texts.
    Fast,
    /// Stronger model for structured analysis.
    Pro,
}

/// The author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The dashboard user.
    User,
    /// The model.
    Model,
}

/// A binary attachment with a declared content type, carried as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// The declared MIME type (e.g., `image/png`, `application/pdf`).
    pub mime_type: String,
    /// Standard base64 encoding of the payload.
    pub data: String,
}

impl Attachment {
    /// Wraps an already base64-encoded payload, rejecting invalid encodings.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::assistant::Attachment;
    ///
    /// assert!(Attachment::new("image/png", "aGVsbG8=").is_ok());
    /// assert!(Attachment::new("image/png", "not base64!").is_err());
    /// ```
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> EngineResult<Self> {
        let attachment = Self {
            mime_type: mime_type.into(),
            data: data.into(),
        };
        attachment.validate()?;
        Ok(attachment)
    }

    /// Encodes raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Checks that the payload decodes.
    pub fn validate(&self) -> EngineResult<()> {
        general_purpose::STANDARD
            .decode(&self.data)
            .map(|_| ())
            .map_err(|e| EngineError::InvalidAttachment {
                mime_type: self.mime_type.clone(),
                message: e.to_string(),
            })
    }
}

/// One part of a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    /// Plain text.
    Text(String),
    /// Inline binary data.
    Inline(Attachment),
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Who authored the turn.
    pub role: Role,
    /// The turn's parts, in order.
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// A request to the AI service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRequest {
    /// The model class to use.
    pub tier: ModelTier,
    /// Instruction applied to the whole conversation.
    #[serde(default)]
    pub system_instruction: Option<String>,
    /// Conversation turns, oldest first; the last one is the current prompt.
    pub contents: Vec<Content>,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// JSON schema the answer must conform to; `None` for free text.
    #[serde(default)]
    pub response_schema: Option<Value>,
}

impl AiRequest {
    /// A single-turn free-text request.
    pub fn prompt(tier: ModelTier, prompt: impl Into<String>) -> Self {
        Self {
            tier,
            system_instruction: None,
            contents: vec![Content::user_text(prompt)],
            temperature: None,
            response_schema: None,
        }
    }

    /// Requests a JSON answer conforming to `schema`.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Returns true if the request expects a JSON answer.
    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}
