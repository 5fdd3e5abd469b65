//! Application state

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use todomatic_core::list::TaskList;
use todomatic_core::task::{example_tasks, TaskId};
use todomatic_core::validate::validate_name;

use crate::config::ServerConfig;
use crate::session::SessionId;
use crate::view::UiState;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tasks: RwLock<TaskList>,
    sessions: RwLock<HashMap<SessionId, UiState>>,
    strict_names: bool,
}

impl AppState {
    /// Build state from configuration, seeding the example tasks if enabled
    pub fn from_config(config: &ServerConfig) -> Self {
        let seed = if config.seed_examples {
            example_tasks()
        } else {
            Vec::new()
        };
        Self::new(TaskList::new(seed), config.strict_names)
    }

    pub fn new(tasks: TaskList, strict_names: bool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tasks: RwLock::new(tasks),
                sessions: RwLock::new(HashMap::new()),
                strict_names,
            }),
        }
    }

    /// The task list controller
    pub fn tasks(&self) -> &RwLock<TaskList> {
        &self.inner.tasks
    }

    /// Run `f` on one browser's transient page state
    ///
    /// Sessions that end up idle are dropped, so only browsers with an open
    /// editor, a draft or a pending flash are kept.
    pub async fn with_ui<R>(&self, session: &SessionId, f: impl FnOnce(&mut UiState) -> R) -> R {
        let mut sessions = self.inner.sessions.write().await;
        let ui = sessions.entry(session.clone()).or_default();
        let result = f(ui);
        if ui.is_idle() {
            sessions.remove(session);
        }
        result
    }

    /// Drop edit mode for a deleted task in every session
    pub async fn forget_task(&self, id: &TaskId) {
        let mut sessions = self.inner.sessions.write().await;
        for ui in sessions.values_mut() {
            ui.edit.forget(id);
        }
        sessions.retain(|_, ui| !ui.is_idle());
    }

    /// Whether blank names are refused
    pub fn strict_names(&self) -> bool {
        self.inner.strict_names
    }

    /// Run `name` through the blank-name check when strict names are on
    pub fn check_name(&self, name: &str) -> todomatic_core::Result<()> {
        if self.strict_names() {
            validate_name(name)?;
        }
        Ok(())
    }
}
