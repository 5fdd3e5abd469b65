//! Task list controller
//!
//! Owns the ordered task collection and the current filter. Every operation
//! is total: an id that matches nothing leaves the list untouched, and the
//! `bool` returned by toggle/delete/edit only tells the caller whether
//! anything changed.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use super::focus::ListSnapshot;
use crate::task::{IdGenerator, Task, TaskFilter, TaskId, UuidGenerator};

/// Heading text for `count` visible tasks, e.g. "1 task remaining"
pub fn remaining_count_text(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("{count} {noun} remaining")
}

/// In-memory task list with its filter selection
pub struct TaskList {
    tasks: Vec<Task>,
    filter: TaskFilter,
    ids: Box<dyn IdGenerator>,
}

impl fmt::Debug for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskList")
            .field("tasks", &self.tasks)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TaskList {
    /// Take ownership of the seed tasks, using random ids for new tasks
    pub fn new(seed: impl IntoIterator<Item = Task>) -> Self {
        Self::with_id_generator(seed, UuidGenerator)
    }

    /// Take ownership of the seed tasks with a custom id source
    ///
    /// If the seed repeats an id, only the first task with that id is kept.
    pub fn with_id_generator(
        seed: impl IntoIterator<Item = Task>,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        let mut seen = HashSet::new();
        let tasks: Vec<Task> = seed
            .into_iter()
            .filter(|task| seen.insert(task.id.clone()))
            .collect();

        Self {
            tasks,
            filter: TaskFilter::default(),
            ids: Box::new(ids),
        }
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Append a new, not completed task named `name`
    ///
    /// The name is taken as-is, empty strings included.
    pub fn add_task(&mut self, name: impl Into<String>) -> Task {
        let mut id = self.ids.next_id();
        while self.contains(&id) {
            id = self.ids.next_id();
        }

        let task = Task::new(id, name);
        debug!(task_id = %task.id, "Adding task");
        self.tasks.push(task.clone());
        task
    }

    /// Flip `completed` on the task with this id
    pub fn toggle_task_completed(&mut self, id: &TaskId) -> bool {
        let mut changed = false;
        for task in self.tasks.iter_mut().filter(|task| &task.id == id) {
            task.completed = !task.completed;
            changed = true;
        }
        debug!(task_id = %id, changed, "Toggled task");
        changed
    }

    /// Remove the task with this id, keeping the order of the rest
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        let changed = self.tasks.len() != before;
        debug!(task_id = %id, changed, "Deleted task");
        changed
    }

    /// Rename the task with this id
    pub fn edit_task(&mut self, id: &TaskId, new_name: impl Into<String>) -> bool {
        let new_name = new_name.into();
        let mut changed = false;
        for task in self.tasks.iter_mut().filter(|task| &task.id == id) {
            task.name.clone_from(&new_name);
            changed = true;
        }
        debug!(task_id = %id, changed, "Edited task");
        changed
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        debug!(filter = %filter, "Filter selected");
        self.filter = filter;
    }

    /// Tasks passing the current filter, in list order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .count()
    }

    /// Heading text for the visible tasks
    pub fn remaining_count_text(&self) -> String {
        remaining_count_text(self.visible_count())
    }

    /// Counts the focus hook compares across a transition
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            total: self.len(),
            visible: self.visible_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::SequentialIdGenerator;

    fn seed() -> Vec<Task> {
        vec![
            Task::new("todo-0", "Eat").with_completed(true),
            Task::new("todo-1", "Sleep"),
        ]
    }

    fn seeded() -> TaskList {
        TaskList::with_id_generator(seed(), SequentialIdGenerator::starting_at(100))
    }

    fn names(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.name.clone()).collect()
    }

    #[test]
    fn test_add_task_appends_active_task() {
        let mut list = seeded();
        let before: Vec<TaskId> = list.tasks().iter().map(|t| t.id.clone()).collect();

        let created = list.add_task("Repeat");

        assert_eq!(list.len(), 3);
        let last = list.tasks().last().unwrap();
        assert_eq!(last, &created);
        assert_eq!(last.name, "Repeat");
        assert!(!last.completed);
        assert!(!before.contains(&last.id));
    }

    #[test]
    fn test_add_task_accepts_empty_name() {
        let mut list = seeded();
        list.add_task("");
        list.add_task("   ");
        assert_eq!(list.len(), 4);
        assert_eq!(list.tasks()[2].name, "");
    }

    #[test]
    fn test_add_task_skips_ids_already_taken() {
        let mut list = TaskList::with_id_generator(seed(), SequentialIdGenerator::default());
        let created = list.add_task("Repeat");
        assert_eq!(created.id, "todo-2");
    }

    #[test]
    fn test_add_then_filter_active() {
        let mut list = seeded();
        list.add_task("Repeat");
        list.set_filter(TaskFilter::Active);
        assert_eq!(names(&list.visible_tasks()), vec!["Sleep", "Repeat"]);
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut list = seeded();
        assert!(list.toggle_task_completed(&TaskId::from("todo-1")));

        assert!(list.tasks()[1].completed);
        assert!(list.tasks()[0].completed);

        list.set_filter(TaskFilter::Completed);
        let ids: Vec<&str> = list.visible_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["todo-0", "todo-1"]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut list = seeded();
        let id = TaskId::from("todo-0");
        list.toggle_task_completed(&id);
        list.toggle_task_completed(&id);
        assert_eq!(list.tasks(), seed().as_slice());
    }

    #[test]
    fn test_toggle_missing_id_is_noop() {
        let mut list = seeded();
        assert!(!list.toggle_task_completed(&TaskId::from("todo-9")));
        assert_eq!(list.tasks(), seed().as_slice());
    }

    #[test]
    fn test_delete_task() {
        let mut list = seeded();
        assert!(list.delete_task(&TaskId::from("todo-0")));
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].id, "todo-1");
    }

    #[test]
    fn test_delete_keeps_order() {
        let mut list = seeded();
        list.add_task("Repeat");
        list.add_task("Wake");
        list.delete_task(&TaskId::from("todo-1"));
        let all: Vec<&Task> = list.tasks().iter().collect();
        assert_eq!(names(&all), vec!["Eat", "Repeat", "Wake"]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut list = seeded();
        assert!(!list.delete_task(&TaskId::from("nope")));
        assert_eq!(list.tasks(), seed().as_slice());
    }

    #[test]
    fn test_edit_changes_only_name() {
        let mut list = seeded();
        assert!(list.edit_task(&TaskId::from("todo-1"), "Nap"));

        let edited = list.get(&TaskId::from("todo-1")).unwrap();
        assert_eq!(edited.name, "Nap");
        assert!(!edited.completed);
        assert_eq!(list.tasks()[0], seed()[0]);
    }

    #[test]
    fn test_edit_missing_id_is_noop() {
        let mut list = seeded();
        assert!(!list.edit_task(&TaskId::from("todo-5"), "Nap"));
        assert_eq!(list.tasks(), seed().as_slice());
    }

    #[test]
    fn test_filters_partition_collection() {
        let mut list = seeded();
        list.add_task("Repeat");
        list.toggle_task_completed(&TaskId::from("todo-1"));

        list.set_filter(TaskFilter::All);
        assert_eq!(list.visible_count(), list.len());

        list.set_filter(TaskFilter::Active);
        let active = list.visible_count();
        assert!(list.visible_tasks().iter().all(|t| !t.completed));

        list.set_filter(TaskFilter::Completed);
        let completed = list.visible_count();
        assert!(list.visible_tasks().iter().all(|t| t.completed));

        assert_eq!(active + completed, list.len());
    }

    #[test]
    fn test_remaining_count_text() {
        assert_eq!(remaining_count_text(0), "0 tasks remaining");
        assert_eq!(remaining_count_text(1), "1 task remaining");
        assert_eq!(remaining_count_text(2), "2 tasks remaining");
    }

    #[test]
    fn test_heading_counts_visible_tasks() {
        let mut list = seeded();
        assert_eq!(list.remaining_count_text(), "2 tasks remaining");
        list.set_filter(TaskFilter::Active);
        assert_eq!(list.remaining_count_text(), "1 task remaining");
    }

    #[test]
    fn test_seed_with_duplicate_ids_keeps_first() {
        let list = TaskList::new(vec![
            Task::new("todo-0", "Eat"),
            Task::new("todo-0", "Drink"),
        ]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].name, "Eat");
    }
}
