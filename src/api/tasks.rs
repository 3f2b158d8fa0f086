//! Task CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskPatch, TaskStatus};

use super::routes::AppState;
use super::types::ApiError;

/// Largest accepted page size; bigger requests are silently capped.
const MAX_PAGE_SIZE: usize = 100;
const DEFAULT_PAGE: usize = 1;
const DEFAULT_SIZE: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Required; rejected when it trims to empty. Defaulted so a missing
    /// field reaches the presence check instead of a decode rejection.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// Absent means "keep the stored title"
    pub title: Option<String>,
    /// Absent keeps the stored description; an empty string clears it
    pub description: Option<String>,
    /// Absent keeps the stored status. Parsed in the handler; an unknown
    /// value is a 400, not a decode rejection.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
}

/// Page of tasks with pagination metadata.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub total: usize,
    pub page: usize,
    pub size: usize,
    pub pages: usize,
    pub tasks: Vec<Task>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /tasks - Create a task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::bad_request("title required"));
    }
    let task = state
        .service
        .create_task(&req.title, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks/{id} - Fetch a single task.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state.service.get_task(id).await?;
    Ok(Json(task))
}

/// GET /tasks - List tasks with pagination and an optional status filter.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE);
    let size = parse_positive(query.size.as_deref(), DEFAULT_SIZE).min(MAX_PAGE_SIZE);
    let status = parse_status_filter(query.status.as_deref())?;

    let listing = state.service.list_tasks(page, size, status).await?;

    Ok(Json(TaskListResponse {
        total: listing.total,
        page,
        size,
        pages: listing.total.div_ceil(size),
        tasks: listing.tasks,
    }))
}

/// PUT /tasks/{id} - Partially update a task. Absent fields are unchanged.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(ApiError::bad_request("title cannot be empty"));
        }
    }
    let status = match req.status.as_deref() {
        Some(s) => Some(
            s.parse::<TaskStatus>()
                .map_err(|_| ApiError::bad_request("invalid status"))?,
        ),
        None => None,
    };

    let patch = TaskPatch {
        title: req.title,
        description: req.description,
        status,
    };
    let task = state.service.update_task(id, patch).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id} - Remove a task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Query parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a positive integer query value, silently falling back to the
/// default on absence, garbage, or non-positive input.
fn parse_positive(value: Option<&str>, default: usize) -> usize {
    match value.and_then(|s| s.parse::<usize>().ok()) {
        Some(n) if n > 0 => n,
        _ => default,
    }
}

/// Parse the optional status filter; an unknown value is a 400.
fn parse_status_filter(value: Option<&str>) -> Result<Option<TaskStatus>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<TaskStatus>()
            .map(Some)
            .map_err(|_| ApiError::bad_request("invalid status filter")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_falls_back_silently() {
        assert_eq!(parse_positive(None, 1), 1);
        assert_eq!(parse_positive(Some("3"), 1), 3);
        assert_eq!(parse_positive(Some("0"), 10), 10);
        assert_eq!(parse_positive(Some("-2"), 10), 10);
        assert_eq!(parse_positive(Some("abc"), 10), 10);
    }

    #[test]
    fn test_parse_status_filter() {
        assert!(parse_status_filter(None).unwrap().is_none());
        assert!(parse_status_filter(Some("")).unwrap().is_none());
        assert_eq!(
            parse_status_filter(Some("Completed")).unwrap(),
            Some(TaskStatus::Completed)
        );
        assert!(parse_status_filter(Some("Bogus")).is_err());
    }
}
