//! Response types for the Timesheet Engine API.
//!
//! This module defines the response bodies and the error handling for the
//! HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::AttendanceStatus;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            EngineError::DuplicateEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("DUPLICATE_EMPLOYEE", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    message,
                    "The employee id is not part of the roster",
                ),
            ),
            EngineError::DayOutOfRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("DAY_OUT_OF_RANGE", message),
            ),
            EngineError::InvalidAttachment { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_ATTACHMENT", message),
            ),
            EngineError::DialogNotOpen => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DIALOG_NOT_OPEN",
                    message,
                    "Open the export dialog with POST /export/dialog first",
                ),
            ),
            EngineError::ExportInProgress => (
                StatusCode::CONFLICT,
                ApiError::new("EXPORT_IN_PROGRESS", message),
            ),
            EngineError::DocumentGeneration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("DOCUMENT_GENERATION_ERROR", message),
            ),
            EngineError::AiRequest { .. } | EngineError::AiResponseParse { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("AI_SERVICE_ERROR", message),
            ),
        };
        Self { status, error }
    }
}

/// Response body for `POST /timesheet/cells`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdateResponse {
    /// The employee whose cell changed.
    pub employee_id: String,
    /// The day of month.
    pub day: u32,
    /// The new status.
    pub status: AttendanceStatus,
    /// The employee's new monthly total.
    pub total_hours: Decimal,
}

/// Response body for `POST /export/dialog/confirm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStartResponse {
    /// Whether a run was started.
    pub started: bool,
    /// Identifier of the started run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    /// Number of employees in the run.
    pub total: usize,
}

/// Response body for `POST /export/cancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    /// Whether a running export was asked to stop.
    pub cancelled: bool,
}

/// Response body for free-text assistant operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResponse {
    /// The assistant's answer or its fallback.
    pub text: String,
}
