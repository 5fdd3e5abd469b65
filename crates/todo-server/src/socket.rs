//! Socket.IO event handlers for real-time clients
//!
//! Clients send intents as events. The client that sent one gets the list
//! view back as `todo:sync`, or `todo:error` if it was refused. Nothing is
//! pushed to other clients.

use serde::{Deserialize, Serialize};
use socketioxide::extract::{Data, SocketRef, State};
use socketioxide::layer::SocketIoLayer;
use socketioxide::{SocketIo, TransportType};
use tracing::{info, warn};

use todomatic_core::task::{TaskFilter, TaskId};
use todomatic_core::{Error, Result};

use crate::payload::TodoView;
use crate::state::AppState;

// ============ Event Payloads ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskPayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdPayload {
    pub task_id: TaskId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskPayload {
    pub task_id: TaskId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPayload {
    pub filter: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
}

// ============ Event Handlers ============

/// Handle new socket connection
pub async fn on_connect(socket: SocketRef) {
    info!("Client connected: {}", socket.id);

    socket.on(
        "todo:request-sync",
        |socket: SocketRef, State(state): State<AppState>| async move {
            reply(&socket, Ok(current_view(&state).await));
        },
    );

    socket.on(
        "todo:add",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<AddTaskPayload>| async move {
            reply(&socket, handle_add(&state, data).await);
        },
    );

    socket.on(
        "todo:toggle",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<TaskIdPayload>| async move {
            reply(&socket, handle_toggle(&state, data).await);
        },
    );

    socket.on(
        "todo:delete",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<TaskIdPayload>| async move {
            reply(&socket, handle_delete(&state, data).await);
        },
    );

    socket.on(
        "todo:edit",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<EditTaskPayload>| async move {
            reply(&socket, handle_edit(&state, data).await);
        },
    );

    socket.on(
        "todo:filter",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<FilterPayload>| async move {
            reply(&socket, handle_filter(&state, data).await);
        },
    );

    socket.on_disconnect(|socket: SocketRef| async move {
        info!("Client disconnected: {}", socket.id);
    });
}

async fn current_view(state: &AppState) -> TodoView {
    TodoView::from_list(&*state.tasks().read().await)
}

pub async fn handle_add(state: &AppState, data: AddTaskPayload) -> Result<TodoView> {
    state.check_name(&data.name)?;

    let mut tasks = state.tasks().write().await;
    let task = tasks.add_task(data.name);
    info!("Added task {}", task.id);
    Ok(TodoView::from_list(&tasks))
}

pub async fn handle_toggle(state: &AppState, data: TaskIdPayload) -> Result<TodoView> {
    let mut tasks = state.tasks().write().await;
    if !tasks.toggle_task_completed(&data.task_id) {
        return Err(Error::TaskNotFound(data.task_id.to_string()));
    }
    Ok(TodoView::from_list(&tasks))
}

pub async fn handle_delete(state: &AppState, data: TaskIdPayload) -> Result<TodoView> {
    let view = {
        let mut tasks = state.tasks().write().await;
        if !tasks.delete_task(&data.task_id) {
            return Err(Error::TaskNotFound(data.task_id.to_string()));
        }
        TodoView::from_list(&tasks)
    };
    state.forget_task(&data.task_id).await;
    Ok(view)
}

pub async fn handle_edit(state: &AppState, data: EditTaskPayload) -> Result<TodoView> {
    state.check_name(&data.name)?;

    let mut tasks = state.tasks().write().await;
    if !tasks.edit_task(&data.task_id, data.name) {
        return Err(Error::TaskNotFound(data.task_id.to_string()));
    }
    Ok(TodoView::from_list(&tasks))
}

pub async fn handle_filter(state: &AppState, data: FilterPayload) -> Result<TodoView> {
    let filter: TaskFilter = data.filter.parse()?;

    let mut tasks = state.tasks().write().await;
    tasks.set_filter(filter);
    Ok(TodoView::from_list(&tasks))
}

/// Send the outcome of an event back to the client that sent it
fn reply(socket: &SocketRef, result: Result<TodoView>) {
    match result {
        Ok(view) => {
            if let Err(e) = socket.emit("todo:sync", &view) {
                warn!("Failed to emit sync: {}", e);
            }
        }
        Err(e) => {
            warn!("Rejected event from {}: {}", socket.id, e);
            let _ = socket.emit(
                "todo:error",
                &ErrorPayload {
                    message: e.to_string(),
                },
            );
        }
    }
}

/// Create and configure Socket.IO layer
pub fn create_socket_layer(state: AppState) -> SocketIoLayer {
    let (layer, io) = SocketIo::builder()
        .with_state(state)
        .transports([TransportType::Websocket])
        .build_layer();

    io.ns("/", on_connect);

    layer
}
