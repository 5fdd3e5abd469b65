//! Post-transition focus hook
//!
//! The UI keeps keyboard focus sensible by comparing what it rendered before
//! a transition with what it renders after. The controller never calls this;
//! the presentation layer takes a snapshot, runs the operation and asks
//! [`focus_after`] where focus should go.

use serde::Serialize;

use crate::task::TaskId;

/// Task counts before or after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub total: usize,
    pub visible: usize,
}

/// How a transition changed a task's edit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTransition {
    Opened(TaskId),
    Closed(TaskId),
}

/// Element that should receive focus after rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "taskId", rename_all = "camelCase")]
pub enum FocusTarget {
    /// The remaining-count heading
    ListHeading,
    /// The rename field of a task in edit mode
    EditField(TaskId),
    /// The Edit button of a task back in view mode
    EditButton(TaskId),
}

/// Where focus goes after moving from `prev` to `next`
///
/// A shrinking list wins over an edit-mode change: the control that would
/// take focus may be gone.
pub fn focus_after(
    prev: ListSnapshot,
    next: ListSnapshot,
    edit: Option<&EditTransition>,
) -> Option<FocusTarget> {
    if next.total < prev.total || next.visible < prev.visible {
        return Some(FocusTarget::ListHeading);
    }

    match edit {
        Some(EditTransition::Opened(id)) => Some(FocusTarget::EditField(id.clone())),
        Some(EditTransition::Closed(id)) => Some(FocusTarget::EditButton(id.clone())),
        None => None,
    }
}
