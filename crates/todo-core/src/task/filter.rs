//! Filter predicate table
//!
//! Each filter name maps to a predicate over [`Task`]. The enum is closed, so
//! a selection outside the table cannot be constructed; strings coming from
//! the outside go through [`FromStr`] and are rejected there.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::model::Task;
use crate::Error;

/// Which tasks are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    /// Every filter, in the order the controls are rendered
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Active, TaskFilter::Completed];

    /// Whether `task` passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}
