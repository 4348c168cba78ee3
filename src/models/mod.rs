pub mod health;
pub mod task;

pub use health::HealthStatus;
pub use task::{Category, NewTaskRequest, Priority, Task, UpdateTaskRequest};
