pub mod board;
pub mod filter;
pub mod stats;

pub use board::TaskBoard;
pub use filter::{TaskFilters, filter_tasks};
pub use stats::{TaskStats, compute_stats};
