use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use taskmanager::client::TaskApiClient;
use taskmanager::config::ClientConfig;
use taskmanager::models::{Category, NewTaskRequest, Priority, Task, UpdateTaskRequest};
use taskmanager::view::{TaskBoard, TaskFilters};

/// Command-line front end for the task service.
#[derive(Debug, Parser)]
#[command(name = "taskctl")]
struct Cli {
    /// Base URL of the API; overrides TASKMANAGER_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks matching the filters, followed by the counters.
    List(ListArgs),
    /// Create a task.
    Add(AddArgs),
    /// Change fields of an existing task.
    Update(UpdateArgs),
    /// Mark a task completed.
    Done { id: String },
    /// Mark a task pending again.
    Undone { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Check that the service is up.
    Health,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    priority: String,
    /// "true" or "false".
    #[arg(long, default_value = "")]
    completed: String,
}

#[derive(Debug, Args)]
struct AddArgs {
    title: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    due: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// YYYY-MM-DD
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<NaiveDate>,
    #[arg(long)]
    clear_due: bool,
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let due = task
        .due_date
        .map(|d| format!(" due {}", d))
        .unwrap_or_default();
    println!(
        "[{}] {} {} ({}, {}){}",
        mark, task.id, task.title, task.priority, task.category, due
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::new_from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    let client = Arc::new(TaskApiClient::new(config)?);
    let mut board = TaskBoard::new(client.clone());

    match cli.command {
        Command::List(args) => {
            board.filters = TaskFilters {
                search: args.search,
                category: args.category,
                priority: args.priority,
                completed: args.completed,
            };
            board.load().await;
            for task in board.visible_tasks() {
                print_task(task);
            }
            let stats = board.stats(Utc::now());
            println!(
                "total: {} | completed: {} | pending: {} | overdue: {}",
                stats.total, stats.completed, stats.pending, stats.overdue
            );
        }
        Command::Add(args) => {
            let req = NewTaskRequest {
                title: Some(args.title),
                description: args.description,
                priority: args.priority.map(Priority::from),
                category: args.category.map(Category::from),
                due_date: args.due,
            };
            if let Some(task) = board.create(&req).await {
                print_task(&task);
            }
        }
        Command::Update(args) => {
            let due_date = if args.clear_due {
                Some(None)
            } else {
                args.due.map(Some)
            };
            let req = UpdateTaskRequest {
                title: args.title,
                description: args.description,
                completed: None,
                priority: args.priority.map(Priority::from),
                category: args.category.map(Category::from),
                due_date,
            };
            if let Some(task) = board.update(&args.id, &req).await {
                print_task(&task);
            }
        }
        Command::Done { id } => {
            if let Some(task) = board.toggle(&id, true).await {
                print_task(&task);
            }
        }
        Command::Undone { id } => {
            if let Some(task) = board.toggle(&id, false).await {
                print_task(&task);
            }
        }
        Command::Delete { id } => {
            if board.delete(&id).await {
                println!("Deleted {}", id);
            }
        }
        Command::Health => {
            if let Some(status) = client.health().await.into_result()? {
                println!("{} at {}", status.status, status.timestamp);
            }
        }
    }

    if let Some(error) = board.error() {
        return Err(error.to_string().into());
    }

    Ok(())
}
