//! Task management commands.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use synergy_core::access;
use synergy_core::common::parse_list;
use synergy_core::task::{
    self,
    model::{NewTask, TaskFilter, TaskStatus, TaskUpdate},
};
use synergy_db::WebSocketMessage;

use super::project::parse_priority;
use crate::context::{today, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks you can see
    List(ListTaskArgs),

    /// Create a new task
    New(NewTaskArgs),

    /// Move a task to a different status
    Status(StatusArgs),

    /// Delete a task (admin)
    Delete {
        /// Task ID
        task_id: String,
    },
}

#[derive(Args)]
pub struct ListTaskArgs {
    /// Match against title and description
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Status (todo, in-progress, done)
    #[arg(long)]
    pub status: Option<String>,

    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,

    /// Project ID
    #[arg(long)]
    pub project: Option<String>,

    /// Only overdue tasks
    #[arg(long)]
    pub overdue: bool,
}

#[derive(Args)]
pub struct NewTaskArgs {
    /// Task title
    pub title: String,

    /// Project ID
    #[arg(short, long)]
    pub project: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: NaiveDate,

    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Assignee user ID (employees always assign to themselves)
    #[arg(short, long, default_value = "")]
    pub assignee: String,

    /// Priority (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Estimated hours
    #[arg(long, default_value_t = 0.0)]
    pub estimate: f64,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Task ID
    pub task_id: String,

    /// Target status (todo, in-progress, done)
    pub status: String,
}

pub async fn execute(cmd: TaskCommands, ctx: &mut AppContext) -> Result<()> {
    let user = ctx.current_user()?;

    match cmd {
        TaskCommands::List(args) => {
            let filter = TaskFilter {
                search: args.search,
                status: args.status.as_deref().map(parse_status).transpose()?,
                priority: args.priority.as_deref().map(parse_priority).transpose()?,
                project_id: args.project,
            };
            let today = today();
            let visible = task::visible_tasks(&ctx.workspace.tasks, &user);
            let mut tasks = task::filter_tasks(visible, &filter);
            if args.overdue {
                tasks.retain(|t| task::is_overdue(t, today));
            }
            output::print_tasks_table(&tasks, today);
        }

        TaskCommands::New(args) => {
            let input = NewTask {
                title: args.title,
                description: args.description,
                project_id: args.project,
                assignee_id: args.assignee,
                priority: parse_priority(&args.priority)?,
                due_date: args.due,
                estimated_hours: args.estimate,
                tags: parse_list(&args.tags),
            };
            let project = ctx.workspace.project(&input.project_id)?;
            let input = access::prepare_new_task(&user, project, input)?;
            let created = ctx.workspace.create_task(&user.id, input)?;

            let mut events = vec![WebSocketMessage::TaskUpdated {
                task_id: created.id.clone(),
                status: created.status.as_str().to_string(),
            }];
            if !created.assignee_id.is_empty() {
                events.push(WebSocketMessage::NotificationsChanged {
                    user_id: created.assignee_id.clone(),
                });
            }
            ctx.commit(&events).await?;

            println!(
                "{} Created task: {} ({})",
                "✓".green().bold(),
                created.title.cyan(),
                created.id.dimmed()
            );
        }

        TaskCommands::Status(args) => {
            let status = parse_status(&args.status)?;
            access::require_task_update(&user, ctx.workspace.task(&args.task_id)?)?;
            let updated = ctx.workspace.update_task(
                Some(&user.id),
                &args.task_id,
                TaskUpdate::status(status),
            )?;
            ctx.commit(&[
                WebSocketMessage::TaskUpdated {
                    task_id: updated.id.clone(),
                    status: updated.status.as_str().to_string(),
                },
                WebSocketMessage::NotificationsChanged {
                    user_id: user.id.clone(),
                },
            ])
            .await?;

            println!(
                "{} Moved task {} to {}",
                "✓".green().bold(),
                updated.title.cyan(),
                updated.status.label().cyan()
            );
        }

        TaskCommands::Delete { task_id } => {
            access::require_task_delete(&user)?;
            let removed = ctx.workspace.delete_task(&task_id)?;
            ctx.commit(&[WebSocketMessage::TaskDeleted {
                task_id: removed.id.clone(),
            }])
            .await?;

            println!(
                "{} Deleted task: {}",
                "✓".green().bold(),
                removed.title.cyan()
            );
        }
    }

    Ok(())
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    TaskStatus::from_str(s).ok_or_else(|| anyhow!("Unknown task status: {}", s))
}
