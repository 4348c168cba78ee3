use std::fmt;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    /// Values outside the known set are kept as sent.
    Unrecognized(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unrecognized(value) => value,
        }
    }

    fn is_blank(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Unrecognized(value),
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Priority::from(value.to_string())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Unrecognized(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Shopping,
    Health,
    Other,
    /// Values outside the known set are kept as sent.
    Unrecognized(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Other => "other",
            Category::Unrecognized(value) => value,
        }
    }

    fn is_blank(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "personal" => Category::Personal,
            "work" => Category::Work,
            "shopping" => Category::Shopping,
            "health" => Category::Health,
            "other" => Category::Other,
            _ => Category::Unrecognized(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unrecognized(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// The task every fresh store starts with.
    pub fn welcome(now: DateTime<Utc>) -> Self {
        Self {
            id: "1".to_string(),
            title: "Welcome to TaskManager!".to_string(),
            description: "This is your first task. Click to edit or delete it.".to_string(),
            completed: false,
            priority: Priority::Medium,
            category: Category::Personal,
            due_date: now.date_naive().checked_add_days(Days::new(7)),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields present in `req` into this task.
    ///
    /// `title`, `priority` and `category` are only taken when non-empty so a
    /// task can never lose its title. `description`, `completed` and `dueDate`
    /// are taken whenever they were sent, `""`, `false` and `null` included.
    pub fn apply(&mut self, req: UpdateTaskRequest, now: DateTime<Utc>) {
        if let Some(title) = req.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(description) = req.description {
            self.description = description;
        }
        if let Some(completed) = req.completed {
            self.completed = completed;
        }
        if let Some(priority) = req.priority.filter(|p| !p.is_blank()) {
            self.priority = priority;
        }
        if let Some(category) = req.category.filter(|c| !c.is_blank()) {
            self.category = category;
        }
        if let Some(due_date) = req.due_date {
            self.due_date = due_date;
        }
        self.updated_at = now.max(self.created_at);
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) if !self.completed => due.and_time(chrono::NaiveTime::MIN).and_utc() < now,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(
        default,
        deserialize_with = "blank_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

impl NewTaskRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Validates the request and fills every unset field with its default.
    pub fn into_task(self, id: String, now: DateTime<Utc>) -> Result<Task, AppError> {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;

        Ok(Task {
            id,
            title,
            description: self.description.unwrap_or_default(),
            completed: false,
            priority: self.priority.filter(|p| !p.is_blank()).unwrap_or_default(),
            category: self.category.filter(|c| !c.is_blank()).unwrap_or_default(),
            due_date: self.due_date,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// `None` leaves the date alone, `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "provided_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTaskRequest {
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => parse_due_date(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("Invalid due date")),
    }
}

fn provided_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_date_as_none(deserializer).map(Some)
}
