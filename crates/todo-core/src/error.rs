//! Error types for the core library
//!
//! Controller operations never fail. These errors only come up where outside
//! input is turned into core values: names typed by the user and filter
//! names arriving as strings.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid task name: {0}")]
    InvalidName(String),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
}
