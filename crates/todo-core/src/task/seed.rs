//! Example tasks the app starts with

use super::model::Task;

/// The three example tasks shown on first load
pub fn example_tasks() -> Vec<Task> {
    vec![
        Task::new("todo-0", "Eat").with_completed(true),
        Task::new("todo-1", "Sleep"),
        Task::new("todo-2", "Repeat"),
    ]
}
