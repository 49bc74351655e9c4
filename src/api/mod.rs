//! HTTP API module for the Timesheet Engine.
//!
//! This module exposes the attendance grid, the export dialog and workflow,
//! and the AI assistant operations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CellRequest, ChatRequest, DialogQuery, DocumentAnalysisRequest, PassAuditRequest,
    PredictionRequest, TaskAnalysisRequest, ToggleRequest, WritingSuggestionRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CancelResponse, CellUpdateResponse, ExportStartResponse,
    TextResponse,
};
pub use state::AppState;
