//! Task and chat message models.

use serde::{Deserialize, Serialize};

/// A work task tracked on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: String,
    /// The task title.
    pub title: String,
    /// The free-text task description.
    #[serde(default)]
    pub description: String,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// A dashboard user.
    User,
    /// The assistant.
    Assistant,
}

/// One message of an assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The message author.
    pub role: ChatRole,
    /// The message text; may be empty for file messages.
    #[serde(default)]
    pub text: String,
    /// Whether the message carried a file.
    #[serde(default)]
    pub is_file: bool,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            is_file: false,
        }
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            is_file: false,
        }
    }
}

/// The kind of text a writing suggestion is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingKind {
    /// A task description.
    Description,
    /// A comment in a task discussion.
    Comment,
}
