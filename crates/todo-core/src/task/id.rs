//! Task id generation

use uuid::Uuid;

use super::model::TaskId;

/// Prefix shared by every generated id
pub const ID_PREFIX: &str = "todo-";

/// Source of fresh task ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> TaskId;
}

/// Random ids, `todo-` followed by a v4 UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> TaskId {
        TaskId::new(format!("{ID_PREFIX}{}", Uuid::new_v4()))
    }
}

/// Monotonic ids `todo-{n}`
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    /// Start counting at `start`
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::new(format!("{ID_PREFIX}{}", self.next));
        self.next += 1;
        id
    }
}
