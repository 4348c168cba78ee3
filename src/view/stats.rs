use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

/// Aggregate counters over `tasks`; a task is overdue when it is still open
/// and its due date started before `now`.
pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();

    TaskStats {
        total,
        completed,
        pending: total - completed,
        overdue,
    }
}
