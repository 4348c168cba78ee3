use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::TaskStore;
use crate::error::AppError;
use crate::models::{NewTaskRequest, Task, UpdateTaskRequest};

/// Process-lifetime store backed by a `Vec` in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding only the welcome task, as after every restart.
    pub fn seeded() -> Self {
        Self::with_tasks(vec![Task::welcome(Utc::now())])
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn create(&self, req: NewTaskRequest) -> Result<Task, AppError> {
        let task = req.into_task(Uuid::new_v4().to_string(), Utc::now())?;

        self.tasks.write().await.push(task.clone());
        debug!("created task {}", task.id);

        Ok(task)
    }

    async fn update(&self, id: &str, req: UpdateTaskRequest) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        let Some(current) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        current.apply(req, Utc::now());
        debug!("updated task {}", id);

        Ok(Some(current.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tasks = self.tasks.write().await;
        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        tasks.remove(index);
        debug!("deleted task {}", id);

        Ok(true)
    }
}
