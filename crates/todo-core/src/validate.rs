//! Name checks for the input boundary
//!
//! [`TaskList`](crate::list::TaskList) accepts any name. Callers that want to
//! refuse blank names run them through [`validate_name`] first.

use crate::{Error, Result};

/// Reject names that are empty or only whitespace
pub fn validate_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName("name cannot be empty".to_string()));
    }
    Ok(name)
}
