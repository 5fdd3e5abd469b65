//! Derived list view shared by the JSON API and Socket.IO

use serde::Serialize;
use todomatic_core::list::TaskList;
use todomatic_core::task::{Task, TaskFilter};

/// Everything a client needs to render the list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    pub tasks: Vec<Task>,
    pub visible_tasks: Vec<Task>,
    pub filter: TaskFilter,
    pub filters: Vec<TaskFilter>,
    pub heading_text: String,
}

impl TodoView {
    pub fn from_list(list: &TaskList) -> Self {
        Self {
            tasks: list.tasks().to_vec(),
            visible_tasks: list.visible_tasks().into_iter().cloned().collect(),
            filter: list.filter(),
            filters: TaskFilter::ALL.to_vec(),
            heading_text: list.remaining_count_text(),
        }
    }
}
