//! HTTP request handlers for the Timesheet Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::timesheet::ExportDialog;

use super::request::{
    CellRequest, ChatRequest, DialogQuery, DocumentAnalysisRequest, PassAuditRequest,
    PredictionRequest, TaskAnalysisRequest, ToggleRequest, WritingSuggestionRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CancelResponse, CellUpdateResponse, ExportStartResponse,
    TextResponse,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/timesheet", get(timesheet_handler))
        .route("/timesheet/cells", post(cell_handler))
        .route("/timesheet/totals", get(totals_handler))
        .route(
            "/export/dialog",
            post(open_dialog_handler)
                .get(dialog_view_handler)
                .delete(close_dialog_handler),
        )
        .route("/export/dialog/toggle", post(toggle_handler))
        .route("/export/dialog/select-all", post(select_all_handler))
        .route("/export/dialog/clear", post(clear_handler))
        .route("/export/dialog/confirm", post(confirm_handler))
        .route("/export/status", get(status_handler))
        .route("/export/cancel", post(cancel_handler))
        .route("/assistant/chat", post(chat_handler))
        .route("/assistant/prediction", post(prediction_handler))
        .route("/assistant/pass-audit", post(pass_audit_handler))
        .route("/assistant/document-analysis", post(document_analysis_handler))
        .route("/assistant/task-analysis", post(task_analysis_handler))
        .route("/assistant/writing-suggestion", post(writing_suggestion_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, turning extractor rejections into `400` responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn log_failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Handler for GET /timesheet.
async fn timesheet_handler(State(state): State<AppState>) -> HandlerResult {
    let view = state.timesheet().read().await.view();
    Ok(json_response(StatusCode::OK, view))
}

/// Handler for POST /timesheet/cells.
///
/// Advances one cell to its next status and returns the new monthly total.
async fn cell_handler(
    State(state): State<AppState>,
    payload: Result<Json<CellRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let mut timesheet = state.timesheet().write().await;
    let status = timesheet
        .record_status(&request.employee_id, request.day)
        .map_err(|e| log_failure(correlation_id, e))?;
    let total_hours = timesheet
        .total_hours(&request.employee_id)
        .map_err(|e| log_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        day = request.day,
        status = %status,
        total_hours = %total_hours,
        "Cell updated"
    );

    Ok(json_response(
        StatusCode::OK,
        CellUpdateResponse {
            employee_id: request.employee_id,
            day: request.day,
            status,
            total_hours,
        },
    ))
}

/// Handler for GET /timesheet/totals.
async fn totals_handler(State(state): State<AppState>) -> HandlerResult {
    let totals = state.timesheet().read().await.totals();
    Ok(json_response(StatusCode::OK, totals))
}

/// Handler for POST /export/dialog.
///
/// Opens a fresh dialog with the whole roster selected, replacing any open one.
async fn open_dialog_handler(State(state): State<AppState>) -> HandlerResult {
    let roster = state.timesheet().read().await.roster().clone();
    let dialog = ExportDialog::open(roster);
    let view = dialog.view();
    *state.dialog().lock().await = Some(dialog);

    info!(selected = view.selected_count, "Export dialog opened");
    Ok(json_response(StatusCode::OK, view))
}

/// Handler for GET /export/dialog.
async fn dialog_view_handler(
    State(state): State<AppState>,
    Query(query): Query<DialogQuery>,
) -> HandlerResult {
    let mut slot = state.dialog().lock().await;
    let dialog = slot.as_mut().ok_or(EngineError::DialogNotOpen)?;
    if let Some(search) = query.search {
        dialog.set_search(search);
    }
    Ok(json_response(StatusCode::OK, dialog.view()))
}

/// Handler for POST /export/dialog/toggle.
async fn toggle_handler(
    State(state): State<AppState>,
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    let mut slot = state.dialog().lock().await;
    let dialog = slot.as_mut().ok_or(EngineError::DialogNotOpen)?;
    dialog
        .selection_mut()
        .toggle(&request.employee_id)
        .map_err(|e| log_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, dialog.view()))
}

/// Handler for POST /export/dialog/select-all.
async fn select_all_handler(State(state): State<AppState>) -> HandlerResult {
    let mut slot = state.dialog().lock().await;
    let dialog = slot.as_mut().ok_or(EngineError::DialogNotOpen)?;
    dialog.selection_mut().select_all();
    Ok(json_response(StatusCode::OK, dialog.view()))
}

/// Handler for POST /export/dialog/clear.
async fn clear_handler(State(state): State<AppState>) -> HandlerResult {
    let mut slot = state.dialog().lock().await;
    let dialog = slot.as_mut().ok_or(EngineError::DialogNotOpen)?;
    dialog.selection_mut().clear();
    Ok(json_response(StatusCode::OK, dialog.view()))
}

/// Handler for DELETE /export/dialog.
///
/// Discards the dialog and its selection. Closing a closed dialog is a no-op.
async fn close_dialog_handler(State(state): State<AppState>) -> HandlerResult {
    state.dialog().lock().await.take();
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for POST /export/dialog/confirm.
///
/// Starts an export over the selected employees and closes the dialog.
/// An empty selection leaves everything unchanged; a busy workflow is a
/// conflict and also leaves the dialog open.
async fn confirm_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let mut slot = state.dialog().lock().await;
    let dialog = slot.as_ref().ok_or(EngineError::DialogNotOpen)?;

    let sheets = state
        .timesheet()
        .read()
        .await
        .individual_sheets(dialog.selection());

    let run = state
        .workflow()
        .start(sheets)
        .map_err(|e| log_failure(correlation_id, e))?;

    let Some(run) = run else {
        info!(correlation_id = %correlation_id, "Export confirmed with an empty selection");
        return Ok(json_response(
            StatusCode::OK,
            ExportStartResponse {
                started: false,
                run_id: None,
                total: 0,
            },
        ));
    };

    slot.take();
    let response = ExportStartResponse {
        started: true,
        run_id: Some(run.run_id()),
        total: run.len(),
    };
    info!(
        correlation_id = %correlation_id,
        run_id = %run.run_id(),
        employees = run.len(),
        "Export dispatched"
    );

    tokio::spawn(async move {
        let report = run.execute().await;
        info!(
            run_id = %report.run_id,
            generated = report.documents.len(),
            failed = report.failures.len(),
            cancelled = report.cancelled,
            "Export report ready"
        );
    });

    Ok(json_response(StatusCode::ACCEPTED, response))
}

/// Handler for GET /export/status.
async fn status_handler(State(state): State<AppState>) -> HandlerResult {
    Ok(json_response(StatusCode::OK, state.workflow().progress()))
}

/// Handler for POST /export/cancel.
async fn cancel_handler(State(state): State<AppState>) -> HandlerResult {
    let cancelled = state.workflow().cancel();
    Ok(json_response(StatusCode::OK, CancelResponse { cancelled }))
}

/// Handler for POST /assistant/chat.
async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;

    for attachment in &request.attachments {
        attachment
            .validate()
            .map_err(|e| log_failure(correlation_id, e))?;
    }

    info!(
        correlation_id = %correlation_id,
        history = request.history.len(),
        attachments = request.attachments.len(),
        "Processing chat request"
    );
    let text = state
        .assistant()
        .chat(&request.history, &request.prompt, &request.attachments)
        .await;
    Ok(json_response(StatusCode::OK, TextResponse { text }))
}

/// Handler for POST /assistant/prediction.
async fn prediction_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, contractor_id = %request.contractor.id, "Processing risk prediction");

    let prediction = state.assistant().project_prediction(&request.contractor).await;
    Ok(json_response(StatusCode::OK, prediction))
}

/// Handler for POST /assistant/pass-audit.
async fn pass_audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<PassAuditRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    info!(correlation_id = %correlation_id, contractor_id = %request.contractor.id, today = %today, "Processing pass audit");

    let text = state
        .assistant()
        .pass_security_audit(&request.contractor, today)
        .await;
    Ok(json_response(StatusCode::OK, TextResponse { text }))
}

/// Handler for POST /assistant/document-analysis.
async fn document_analysis_handler(
    State(state): State<AppState>,
    payload: Result<Json<DocumentAnalysisRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, document_id = %request.document.id, "Processing document analysis");

    let analysis = state
        .assistant()
        .document_analysis(&request.document, &request.contractor)
        .await;
    Ok(json_response(StatusCode::OK, analysis))
}

/// Handler for POST /assistant/task-analysis.
async fn task_analysis_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaskAnalysisRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, task_id = %request.task.id, "Processing task analysis");

    let analysis = state
        .assistant()
        .task_analysis(&request.task, &request.all_tasks)
        .await;
    Ok(json_response(StatusCode::OK, analysis))
}

/// Handler for POST /assistant/writing-suggestion.
async fn writing_suggestion_handler(
    State(state): State<AppState>,
    payload: Result<Json<WritingSuggestionRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, kind = ?request.kind, "Processing writing suggestion");

    let text = state
        .assistant()
        .writing_suggestion(request.kind, &request.context, &request.current_text)
        .await;
    Ok(json_response(StatusCode::OK, TextResponse { text }))
}
