//! Task list state
//!
//! The controller that owns the tasks and the focus hook the UI runs after
//! each transition.

mod controller;
mod focus;

pub use controller::{remaining_count_text, TaskList};
pub use focus::{focus_after, EditTransition, FocusTarget, ListSnapshot};
