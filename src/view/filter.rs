use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Criteria selected in the task list view. An empty string disables the
/// corresponding predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilters {
    pub search: String,
    pub category: String,
    pub priority: String,
    /// `"true"`, `"false"` or empty.
    pub completed: String,
}

impl TaskFilters {
    pub fn is_active(&self) -> bool {
        !(self.search.is_empty()
            && self.category.is_empty()
            && self.priority.is_empty()
            && self.completed.is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && (self.category.is_empty() || task.category.as_str() == self.category)
            && (self.priority.is_empty() || task.priority.as_str() == self.priority)
            && self.matches_completed(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }

    fn matches_completed(&self, task: &Task) -> bool {
        match self.completed.as_str() {
            "" => true,
            "true" => task.completed,
            "false" => !task.completed,
            _ => false,
        }
    }
}

/// Tasks matching every active filter, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filters.matches(task)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Category, NewTaskRequest, Priority};

    fn task(id: &str, title: &str, description: &str, completed: bool) -> Task {
        let mut task = NewTaskRequest {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..NewTaskRequest::default()
        }
        .into_task(id.to_string(), Utc::now())
        .unwrap();
        task.completed = completed;
        task
    }

    fn sample() -> Vec<Task> {
        let mut tasks = vec![
            task("1", "Pay rent", "before the 5th", false),
            task("2", "Gym", "leg day", true),
            task("3", "Quarterly report", "send to Rent-a-car team", false),
        ];
        tasks[1].category = Category::Health;
        tasks[2].category = Category::Work;
        tasks[2].priority = Priority::High;
        tasks
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_keep_everything_in_order() {
        let tasks = sample();
        let filters = TaskFilters::default();

        assert!(!filters.is_active());
        assert_eq!(ids(filter_tasks(&tasks, &filters)), ["1", "2", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let filters = TaskFilters {
            search: "RENT".to_string(),
            ..TaskFilters::default()
        };

        assert_eq!(ids(filter_tasks(&tasks, &filters)), ["1", "3"]);
    }

    #[test]
    fn test_completed_filter() {
        let tasks = sample();
        let mut filters = TaskFilters {
            completed: "true".to_string(),
            ..TaskFilters::default()
        };
        assert_eq!(ids(filter_tasks(&tasks, &filters)), ["2"]);

        filters.completed = "false".to_string();
        assert_eq!(ids(filter_tasks(&tasks, &filters)), ["1", "3"]);

        filters.completed = "maybe".to_string();
        assert!(filter_tasks(&tasks, &filters).is_empty());
    }

    #[test]
    fn test_filters_are_anded() {
        let tasks = sample();
        let filters = TaskFilters {
            search: "rent".to_string(),
            category: "work".to_string(),
            priority: "high".to_string(),
            completed: "false".to_string(),
        };

        assert_eq!(ids(filter_tasks(&tasks, &filters)), ["3"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut filters = TaskFilters {
            priority: "low".to_string(),
            ..TaskFilters::default()
        };
        assert!(filters.is_active());

        filters.clear();
        assert_eq!(filters, TaskFilters::default());
    }
}
