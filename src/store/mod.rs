pub mod memory;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTaskRequest, Task, UpdateTaskRequest};

pub use memory::InMemoryTaskStore;

/// Authoritative collection of tasks.
///
/// Handlers only talk to this trait so the backing storage can be swapped
/// without touching the HTTP layer. Writers are not coordinated: concurrent
/// updates to the same id resolve as last write wins.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, AppError>;

    /// Validates `req`, assigns a fresh id and timestamps, and appends the task.
    async fn create(&self, req: NewTaskRequest) -> Result<Task, AppError>;

    /// Returns `None` when no task has `id`.
    async fn update(&self, id: &str, req: UpdateTaskRequest) -> Result<Option<Task>, AppError>;

    /// Returns `false` when no task has `id`.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
