//! Request types for the Timesheet Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assistant::Attachment;
use crate::models::{ChatMessage, ContractDocument, Contractor, Task, WritingKind};

/// Request body for `POST /timesheet/cells`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellRequest {
    /// The employee whose cell was clicked.
    pub employee_id: String,
    /// The day of month (1-based).
    pub day: u32,
}

/// Query string for `GET /export/dialog`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogQuery {
    /// New search text; the previous search is kept when absent.
    #[serde(default)]
    pub search: Option<String>,
}

/// Request body for `POST /export/dialog/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    /// The employee to add to or remove from the selection.
    pub employee_id: String,
}

/// Request body for `POST /assistant/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Earlier messages, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// The new user message; may be empty when attachments are sent.
    #[serde(default)]
    pub prompt: String,
    /// Files sent with the new message.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Request body for `POST /assistant/prediction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// The contractor to evaluate.
    pub contractor: Contractor,
}

/// Request body for `POST /assistant/pass-audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassAuditRequest {
    /// The contractor whose passes are audited.
    pub contractor: Contractor,
    /// Reference date; the server's local date when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for `POST /assistant/document-analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysisRequest {
    /// The document to audit.
    pub document: ContractDocument,
    /// The contractor the document belongs to.
    pub contractor: Contractor,
}

/// Request body for `POST /assistant/task-analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAnalysisRequest {
    /// The task to review.
    pub task: Task,
    /// Every task in the system; may include `task`.
    #[serde(default)]
    pub all_tasks: Vec<Task>,
}

/// Request body for `POST /assistant/writing-suggestion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritingSuggestionRequest {
    /// What is being written.
    pub kind: WritingKind,
    /// Task title or discussion so far.
    #[serde(default)]
    pub context: String,
    /// The user's current draft.
    #[serde(default)]
    pub current_text: String,
}
