//! Task API endpoints
//!
//! JSON access to the same task list the page renders. Unlike the page, a
//! missing task id is reported as 404 here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use todomatic_core::task::{Task, TaskFilter, TaskId};
use todomatic_core::Error;

use crate::error::ApiError;
use crate::payload::TodoView;
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TaskNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetFilterRequest {
    pub filter: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - Current list view
async fn list_tasks(State(state): State<AppState>) -> Json<TodoView> {
    Json(TodoView::from_list(&*state.tasks().read().await))
}

/// POST /api/tasks - Add a task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<TaskNameRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    state.check_name(&req.name)?;

    let task = state.tasks().write().await.add_task(req.name);
    info!("Created task {}", task.id);

    Ok((StatusCode::CREATED, Json(task)))
}

/// POST /api/tasks/{id}/toggle - Flip completion
async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<Task>, ApiError> {
    let task = {
        let mut tasks = state.tasks().write().await;
        tasks.toggle_task_completed(&id);
        tasks.get(&id).cloned()
    };
    let task = task.ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

    Ok(Json(task))
}

/// PATCH /api/tasks/{id} - Rename a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(req): Json<TaskNameRequest>,
) -> Result<Json<Task>, ApiError> {
    state.check_name(&req.name)?;

    let task = {
        let mut tasks = state.tasks().write().await;
        tasks.edit_task(&id, req.name);
        tasks.get(&id).cloned()
    };
    let task = task.ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

    Ok(Json(task))
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.tasks().write().await.delete_task(&id);
    if !deleted {
        return Err(Error::TaskNotFound(id.to_string()).into());
    }

    state.forget_task(&id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/filter - Select a filter
async fn set_filter(
    State(state): State<AppState>,
    Json(req): Json<SetFilterRequest>,
) -> Result<Json<TodoView>, ApiError> {
    let filter: TaskFilter = req.filter.parse()?;

    let view = {
        let mut tasks = state.tasks().write().await;
        tasks.set_filter(filter);
        TodoView::from_list(&tasks)
    };

    Ok(Json(view))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", patch(update_task).delete(delete_task))
        .route("/api/tasks/{id}/toggle", post(toggle_task))
        .route("/api/filter", put(set_filter))
}
