//! AI assistant boundary.
//!
//! [`AiService`] is the capability seam: a single `generate` call against a
//! hosted model. [`GeminiClient`] implements it over HTTP. [`Assistant`]
//! builds the dashboard's prompts on top and guarantees a user-facing
//! answer for every operation, substituting fixed fallbacks on failure.

mod gemini;
mod operations;
pub mod prompts;
mod request;
mod service;

pub use gemini::GeminiClient;
pub use operations::{
    Assistant, CHAT_ERROR_REPLY, EMPTY_CHAT_REPLY, PASS_AUDIT_ERROR_REPLY, WRITING_ERROR_REPLY,
};
pub use request::{AiRequest, Attachment, Content, ModelTier, Part, Role};
pub use service::AiService;
