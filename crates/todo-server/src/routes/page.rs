//! HTML page and its form actions
//!
//! Every form posts one intent, the handler applies at most one transition
//! and redirects back to `/`. Ids that match nothing are ignored, the same as
//! in the controller. Edit mode, drafts and focus belong to the browser's
//! session, the task list is shared.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderName},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::debug;

use todomatic_core::list::{focus_after, EditTransition, TaskList};
use todomatic_core::task::{TaskFilter, TaskId};

use crate::error::ApiError;
use crate::render::{render_page, PageView};
use crate::session::SessionId;
use crate::state::AppState;

type PageRedirect = ([(HeaderName, String); 1], Redirect);

#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameForm {
    #[serde(default)]
    pub name: String,
}

fn back_to_list(session: &SessionId) -> PageRedirect {
    (session.set_cookie(), Redirect::to("/"))
}

/// Apply one list operation and record where focus goes next
async fn apply<R>(
    state: &AppState,
    session: &SessionId,
    edit: Option<EditTransition>,
    op: impl FnOnce(&mut TaskList) -> R,
) -> R {
    let (prev, next, result) = {
        let mut tasks = state.tasks().write().await;
        let prev = tasks.snapshot();
        let result = op(&mut *tasks);
        (prev, tasks.snapshot(), result)
    };

    let focus = focus_after(prev, next, edit.as_ref());
    debug!(%session, ?focus, "Focus after transition");
    state.with_ui(session, |ui| ui.pending_focus = focus).await;
    result
}

/// GET / - Render the list
async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ([(HeaderName, String); 1], Html<String>) {
    let session = SessionId::from_headers(&headers);
    let tasks = state.tasks().read().await;
    let html = state
        .with_ui(&session, |ui| {
            let (focus, alert) = ui.take_flash();
            render_page(&PageView {
                list: &tasks,
                edit: &ui.edit,
                add_draft: &ui.add_draft,
                focus: focus.as_ref(),
                alert: alert.as_deref(),
            })
        })
        .await;

    (session.set_cookie(), Html(html))
}

/// POST /tasks - Add a task from the add form
async fn add_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddTaskForm>,
) -> PageRedirect {
    let session = SessionId::from_headers(&headers);
    if let Err(e) = state.check_name(&form.text) {
        state
            .with_ui(&session, |ui| {
                ui.alert = Some(e.to_string());
                ui.add_draft = form.text;
            })
            .await;
        return back_to_list(&session);
    }

    apply(&state, &session, None, |tasks| tasks.add_task(form.text)).await;
    state.with_ui(&session, |ui| ui.add_draft.clear()).await;
    back_to_list(&session)
}

/// POST /tasks/{id}/toggle - Checkbox clicked
async fn toggle_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> PageRedirect {
    let session = SessionId::from_headers(&headers);
    apply(&state, &session, None, |tasks| tasks.toggle_task_completed(&id)).await;
    back_to_list(&session)
}

/// POST /tasks/{id}/delete - Delete clicked
async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> PageRedirect {
    let session = SessionId::from_headers(&headers);
    if apply(&state, &session, None, |tasks| tasks.delete_task(&id)).await {
        state.forget_task(&id).await;
    }
    back_to_list(&session)
}

/// POST /tasks/{id}/edit - Enter edit mode
async fn open_editor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> PageRedirect {
    let session = SessionId::from_headers(&headers);
    if !state.tasks().read().await.contains(&id) {
        return back_to_list(&session);
    }

    let opened = state.with_ui(&session, |ui| ui.edit.open(id)).await;
    apply(&state, &session, Some(opened), |_| ()).await;
    back_to_list(&session)
}

/// POST /tasks/{id}/cancel - Leave edit mode without renaming
async fn cancel_editor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
) -> PageRedirect {
    let session = SessionId::from_headers(&headers);
    let closed = state.with_ui(&session, |ui| ui.edit.close(&id)).await;
    if closed.is_some() {
        apply(&state, &session, closed, |_| ()).await;
    }
    back_to_list(&session)
}

/// POST /tasks/{id}/save - Rename and leave edit mode
async fn save_editor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<TaskId>,
    Form(form): Form<RenameForm>,
) -> PageRedirect {
    let session = SessionId::from_headers(&headers);
    if let Err(e) = state.check_name(&form.name) {
        state
            .with_ui(&session, |ui| {
                ui.alert = Some(e.to_string());
                ui.edit.set_draft(&id, form.name);
            })
            .await;
        return back_to_list(&session);
    }

    let closed = state.with_ui(&session, |ui| ui.edit.close(&id)).await;
    apply(&state, &session, closed, |tasks| tasks.edit_task(&id, form.name)).await;
    back_to_list(&session)
}

/// POST /filter/{name} - Filter button clicked
async fn set_filter(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, ApiError> {
    let filter: TaskFilter = name.parse()?;
    state.tasks().write().await.set_filter(filter);
    Ok(Redirect::to("/"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/tasks", post(add_task))
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/tasks/{id}/delete", post(delete_task))
        .route("/tasks/{id}/edit", post(open_editor))
        .route("/tasks/{id}/cancel", post(cancel_editor))
        .route("/tasks/{id}/save", post(save_editor))
        .route("/filter/{name}", post(set_filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderValue, Request, Response, StatusCode},
    };
    use todomatic_core::list::FocusTarget;
    use todomatic_core::task::{example_tasks, Task};
    use tower::ServiceExt;

    use crate::view::UiState;

    fn build_state() -> AppState {
        AppState::new(
            TaskList::new(vec![
                Task::new("todo-0", "Eat").with_completed(true),
                Task::new("todo-1", "Sleep"),
            ]),
            true,
        )
    }

    /// A browser: keeps the session cookie between requests
    struct Client {
        state: AppState,
        cookie: Option<String>,
    }

    impl Client {
        fn new(state: &AppState) -> Self {
            Self {
                state: state.clone(),
                cookie: None,
            }
        }

        async fn send(&mut self, method: &str, uri: &str, body: &str) -> Response<Body> {
            let mut request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            if let Some(cookie) = &self.cookie {
                request = request.header(header::COOKIE, cookie.as_str());
            }

            let response = router()
                .with_state(self.state.clone())
                .oneshot(request.body(Body::from(body.to_string())).unwrap())
                .await
                .unwrap();
            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_string());
            }
            response
        }

        async fn post(&mut self, uri: &str, body: &str) -> StatusCode {
            let response = self.send("POST", uri, body).await;
            let status = response.status();
            if status == StatusCode::SEE_OTHER {
                assert_eq!(response.headers()[header::LOCATION], "/");
            }
            status
        }

        async fn get_page(&mut self) -> String {
            let response = self.send("GET", "/", "").await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            String::from_utf8(body.to_vec()).unwrap()
        }

        /// Look at this browser's transient state without consuming it
        async fn ui<R>(&self, f: impl FnOnce(&UiState) -> R) -> R {
            let mut headers = HeaderMap::new();
            if let Some(cookie) = &self.cookie {
                headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
            }
            let session = SessionId::from_headers(&headers);
            self.state.with_ui(&session, |ui| f(ui)).await
        }
    }

    async fn visible_names(state: &AppState) -> Vec<String> {
        state
            .tasks()
            .read()
            .await
            .visible_tasks()
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    #[tokio::test]
    async fn index_renders_seeded_tasks() {
        let state = AppState::new(TaskList::new(example_tasks()), true);
        let html = Client::new(&state).get_page().await;
        assert!(html.contains(">3 tasks remaining</h2>"));
        assert!(html.contains(">Repeat</label>"));
    }

    #[tokio::test]
    async fn index_issues_session_cookie() {
        let state = build_state();
        let mut client = Client::new(&state);
        let response = client.send("GET", "/", "").await;

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("todomatic_session="));
        assert!(set_cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn add_then_filter_active() {
        let state = build_state();
        let mut client = Client::new(&state);
        assert_eq!(client.post("/tasks", "text=Repeat").await, StatusCode::SEE_OTHER);
        assert_eq!(client.post("/filter/Active", "").await, StatusCode::SEE_OTHER);

        assert_eq!(visible_names(&state).await, vec!["Sleep", "Repeat"]);
        let html = client.get_page().await;
        assert!(html.contains(">2 tasks remaining</h2>"));
    }

    #[tokio::test]
    async fn blank_name_is_refused_with_alert() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/tasks", "text=++").await;

        assert_eq!(state.tasks().read().await.len(), 2);
        let html = client.get_page().await;
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("value=\"  \" required>"));

        let html = client.get_page().await;
        assert!(!html.contains("role=\"alert\""));
    }

    #[tokio::test]
    async fn browsers_keep_their_own_page_state() {
        let state = build_state();
        let mut alice = Client::new(&state);
        let mut bob = Client::new(&state);

        alice.post("/tasks/todo-1/edit", "").await;
        alice.post("/tasks", "text=+").await;

        let html = bob.get_page().await;
        assert!(!html.contains("role=\"alert\""));
        assert!(!html.contains("New name for Sleep"));
        assert!(!html.contains("value=\" \" required>"));
        assert!(!html.contains(" autofocus"));

        let html = alice.get_page().await;
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("New name for Sleep"));
        assert!(html.contains("value=\" \" required>"));
    }

    #[tokio::test]
    async fn shared_list_changes_reach_other_browsers() {
        let state = build_state();
        let mut alice = Client::new(&state);
        let mut bob = Client::new(&state);

        alice.post("/tasks", "text=Repeat").await;

        let html = bob.get_page().await;
        assert!(html.contains(">Repeat</label>"));
        assert!(!html.contains(" autofocus"));
    }

    #[tokio::test]
    async fn toggle_then_filter_completed() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/tasks/todo-1/toggle", "").await;
        client.post("/filter/Completed", "").await;

        assert_eq!(visible_names(&state).await, vec!["Eat", "Sleep"]);
    }

    #[tokio::test]
    async fn delete_focuses_heading() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/tasks/todo-0/delete", "").await;

        let tasks = state.tasks().read().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.tasks()[0].id, "todo-1");
        drop(tasks);

        assert_eq!(
            client.ui(|ui| ui.pending_focus.clone()).await,
            Some(FocusTarget::ListHeading)
        );
        let html = client.get_page().await;
        assert!(html.contains("<h2 id=\"list-heading\" tabindex=\"-1\" autofocus>"));
    }

    #[tokio::test]
    async fn toggle_out_of_active_view_focuses_heading() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/filter/Active", "").await;
        client.post("/tasks/todo-1/toggle", "").await;

        assert_eq!(
            client.ui(|ui| ui.pending_focus.clone()).await,
            Some(FocusTarget::ListHeading)
        );
    }

    #[tokio::test]
    async fn missing_ids_are_ignored() {
        let state = build_state();
        let mut client = Client::new(&state);
        for action in ["toggle", "delete", "edit", "cancel"] {
            let uri = format!("/tasks/todo-9/{action}");
            assert_eq!(client.post(&uri, "").await, StatusCode::SEE_OTHER);
        }
        assert_eq!(client.post("/tasks/todo-9/save", "name=Nap").await, StatusCode::SEE_OTHER);

        assert_eq!(state.tasks().read().await.len(), 2);
        assert_eq!(client.ui(|ui| ui.edit.editing().cloned()).await, None);
    }

    #[tokio::test]
    async fn percent_encoded_ids_reach_the_task() {
        let state = AppState::new(TaskList::new(vec![Task::new("a/b?c", "Odd")]), true);
        let mut client = Client::new(&state);

        assert!(client.get_page().await.contains("action=\"/tasks/a%2Fb%3Fc/toggle\""));
        client.post("/tasks/a%2Fb%3Fc/toggle", "").await;

        assert!(state.tasks().read().await.tasks()[0].completed);
    }

    #[tokio::test]
    async fn edit_save_round() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/tasks/todo-1/edit", "").await;
        assert_eq!(
            client.ui(|ui| ui.pending_focus.clone()).await,
            Some(FocusTarget::EditField(TaskId::from("todo-1")))
        );
        let html = client.get_page().await;
        assert!(html.contains("New name for Sleep"));

        client.post("/tasks/todo-1/save", "name=Nap").await;
        let (editing, focus) = client
            .ui(|ui| (ui.edit.editing().cloned(), ui.pending_focus.clone()))
            .await;
        assert_eq!(editing, None);
        assert_eq!(focus, Some(FocusTarget::EditButton(TaskId::from("todo-1"))));

        assert_eq!(state.tasks().read().await.tasks()[1].name, "Nap");
    }

    #[tokio::test]
    async fn blank_rename_stays_in_edit_mode() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/tasks/todo-1/edit", "").await;
        client.post("/tasks/todo-1/save", "name=+").await;

        assert_eq!(state.tasks().read().await.tasks()[1].name, "Sleep");
        let (editing, alert) = client
            .ui(|ui| (ui.edit.editing().cloned(), ui.alert.clone()))
            .await;
        assert_eq!(editing, Some(TaskId::from("todo-1")));
        assert!(alert.is_some());
    }

    #[tokio::test]
    async fn cancel_discards_edit_mode() {
        let state = build_state();
        let mut client = Client::new(&state);
        client.post("/tasks/todo-0/edit", "").await;
        client.post("/tasks/todo-0/cancel", "name=Feast").await;

        assert_eq!(state.tasks().read().await.tasks()[0].name, "Eat");
        let (editing, focus) = client
            .ui(|ui| (ui.edit.editing().cloned(), ui.pending_focus.clone()))
            .await;
        assert_eq!(editing, None);
        assert_eq!(focus, Some(FocusTarget::EditButton(TaskId::from("todo-0"))));
    }

    #[tokio::test]
    async fn deleting_edited_task_leaves_edit_mode_everywhere() {
        let state = build_state();
        let mut alice = Client::new(&state);
        let mut bob = Client::new(&state);
        alice.post("/tasks/todo-1/edit", "").await;
        bob.post("/tasks/todo-1/delete", "").await;

        assert_eq!(alice.ui(|ui| ui.edit.editing().cloned()).await, None);
    }

    #[tokio::test]
    async fn unknown_filter_is_bad_request() {
        let state = build_state();
        let mut client = Client::new(&state);
        assert_eq!(client.post("/filter/Someday", "").await, StatusCode::BAD_REQUEST);
        assert_eq!(state.tasks().read().await.filter(), TaskFilter::All);
    }
}
