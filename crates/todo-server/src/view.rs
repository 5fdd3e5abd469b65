//! Transient UI state
//!
//! None of this belongs to the task list: it is which task is being renamed,
//! what has been typed so far, and where focus goes on the next render.

use todomatic_core::list::{EditTransition, FocusTarget};
use todomatic_core::task::TaskId;

/// How a single task is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMode {
    View,
    Edit { draft: String },
}

/// The one task (if any) currently in edit mode
#[derive(Debug, Default)]
pub struct EditSession {
    editing: Option<(TaskId, String)>,
}

impl EditSession {
    pub fn mode(&self, id: &TaskId) -> ItemMode {
        match &self.editing {
            Some((editing, draft)) if editing == id => ItemMode::Edit {
                draft: draft.clone(),
            },
            _ => ItemMode::View,
        }
    }

    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref().map(|(id, _)| id)
    }

    /// Put `id` in edit mode with an empty draft, leaving any other task
    pub fn open(&mut self, id: TaskId) -> EditTransition {
        self.editing = Some((id.clone(), String::new()));
        EditTransition::Opened(id)
    }

    /// Keep what was typed so a refused save can be shown again
    pub fn set_draft(&mut self, id: &TaskId, draft: impl Into<String>) {
        if let Some((editing, current)) = &mut self.editing {
            if editing == id {
                *current = draft.into();
            }
        }
    }

    /// Leave edit mode, discarding the draft
    pub fn close(&mut self, id: &TaskId) -> Option<EditTransition> {
        if self.editing() != Some(id) {
            return None;
        }
        self.editing = None;
        Some(EditTransition::Closed(id.clone()))
    }

    /// Drop edit mode for a task that no longer exists
    pub fn forget(&mut self, id: &TaskId) {
        if self.editing() == Some(id) {
            self.editing = None;
        }
    }
}

/// Everything the page keeps between requests
#[derive(Debug, Default)]
pub struct UiState {
    pub edit: EditSession,
    /// Text of the add form after a refused submit
    pub add_draft: String,
    /// Focus target for the next render only
    pub pending_focus: Option<FocusTarget>,
    /// Validation message for the next render only
    pub alert: Option<String>,
}

impl UiState {
    /// Take the one-shot parts for rendering
    pub fn take_flash(&mut self) -> (Option<FocusTarget>, Option<String>) {
        (self.pending_focus.take(), self.alert.take())
    }

    /// Nothing left worth keeping between requests
    pub fn is_idle(&self) -> bool {
        self.edit.editing().is_none()
            && self.add_draft.is_empty()
            && self.pending_focus.is_none()
            && self.alert.is_none()
    }
}
