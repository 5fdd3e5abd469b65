//! Core library for TodoMatic
//!
//! This crate contains the task-list logic, including:
//! - The task record and filter predicate table
//! - The task list controller
//! - The focus hook run after each transition

pub mod error;
pub mod list;
pub mod task;
pub mod validate;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
