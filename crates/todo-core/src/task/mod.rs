//! Task module
//!
//! The task record, the filter predicate table and id generation.

mod filter;
mod id;
mod model;
mod seed;

pub use filter::TaskFilter;
pub use id::{IdGenerator, SequentialIdGenerator, UuidGenerator, ID_PREFIX};
pub use model::*;
pub use seed::example_tasks;
