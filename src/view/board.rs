use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::{ApiResponse, TaskApi};
use crate::models::{NewTaskRequest, Task, UpdateTaskRequest};
use crate::view::{TaskFilters, TaskStats, compute_stats, filter_tasks};

/// Client-side view state: the last known task list, the last error and the
/// active filters.
///
/// A failed call records its error and leaves the task list as it was.
pub struct TaskBoard {
    api: Arc<dyn TaskApi>,
    tasks: Vec<Task>,
    error: Option<String>,
    pub filters: TaskFilters,
}

impl TaskBoard {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            error: None,
            filters: TaskFilters::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filters)
    }

    /// Counters over the whole list, regardless of filters.
    pub fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        compute_stats(&self.tasks, now)
    }

    pub async fn load(&mut self) {
        self.error = None;
        let response = self.api.get_tasks().await;
        if let Some(tasks) = self.absorb(response) {
            self.tasks = tasks;
        }
    }

    pub async fn create(&mut self, req: &NewTaskRequest) -> Option<Task> {
        let response = self.api.create_task(req).await;
        let task = self.absorb(response)?;
        self.tasks.insert(0, task.clone());
        Some(task)
    }

    pub async fn update(&mut self, id: &str, req: &UpdateTaskRequest) -> Option<Task> {
        let response = self.api.update_task(id, req).await;
        let task = self.absorb(response)?;
        self.replace(id, &task);
        Some(task)
    }

    pub async fn toggle(&mut self, id: &str, completed: bool) -> Option<Task> {
        let response = self.api.toggle_task_completion(id, completed).await;
        let task = self.absorb(response)?;
        self.replace(id, &task);
        Some(task)
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let response = self.api.delete_task(id).await;
        if let Some(error) = response.error {
            self.error = Some(error);
            return false;
        }
        self.tasks.retain(|t| t.id != id);
        true
    }

    fn replace(&mut self, id: &str, task: &Task) {
        for slot in self.tasks.iter_mut().filter(|t| t.id == id) {
            *slot = task.clone();
        }
    }

    fn absorb<T>(&mut self, response: ApiResponse<T>) -> Option<T> {
        match response.error {
            Some(error) => {
                self.error = Some(error);
                None
            }
            None => response.data,
        }
    }
}
