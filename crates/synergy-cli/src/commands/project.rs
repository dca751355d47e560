//! Project management commands.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use synergy_core::access;
use synergy_core::common::{parse_list, Priority};
use synergy_core::project::{
    self,
    model::{NewProject, ProjectFilter, ProjectStatus, ProjectUpdate},
};
use synergy_db::WebSocketMessage;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects you can see
    List(ListProjectArgs),

    /// Create a project (admin)
    New(NewProjectArgs),

    /// Edit a project (admin)
    Update(UpdateProjectArgs),

    /// Delete a project and its tasks (admin)
    Delete {
        /// Project ID
        project_id: String,
    },
}

#[derive(Args)]
pub struct ListProjectArgs {
    /// Match against name and description
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Status (active, completed, paused)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct NewProjectArgs {
    /// Project name
    pub name: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Priority (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Comma-separated team member IDs
    #[arg(long, default_value = "")]
    pub team: String,

    #[arg(long)]
    pub budget: Option<u64>,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Args)]
pub struct UpdateProjectArgs {
    /// Project ID
    pub project_id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Status (active, completed, paused)
    #[arg(long)]
    pub status: Option<String>,

    /// Progress percentage (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub progress: Option<u8>,

    #[arg(long)]
    pub start: Option<NaiveDate>,

    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub priority: Option<String>,

    /// Comma-separated team member IDs
    #[arg(long)]
    pub team: Option<String>,
}

pub async fn execute(cmd: ProjectCommands, ctx: &mut AppContext) -> Result<()> {
    let user = ctx.current_user()?;

    match cmd {
        ProjectCommands::List(args) => {
            let filter = ProjectFilter {
                search: args.search,
                status: args.status.as_deref().map(parse_status).transpose()?,
            };
            let ws = &ctx.workspace;
            let visible = project::visible_projects(&ws.projects, &user);
            let rows: Vec<_> = project::filter_projects(visible, &filter)
                .into_iter()
                .map(|p| (p, project::project_summary(p, &ws.tasks, &ws.users)))
                .collect();
            output::print_projects_table(&rows);
        }

        ProjectCommands::New(args) => {
            access::require_admin(&user, "create projects")?;
            let input = NewProject {
                name: args.name,
                description: args.description,
                start_date: args.start,
                end_date: args.end,
                priority: parse_priority(&args.priority)?,
                team_members: parse_list(&args.team),
                budget: args.budget,
                tags: parse_list(&args.tags),
            };
            let created = ctx.workspace.create_project(&user.id, input)?;
            ctx.commit(&[WebSocketMessage::ProjectUpdated {
                project_id: created.id.clone(),
            }])
            .await?;

            println!(
                "{} Created project: {} ({})",
                "✓".green().bold(),
                created.name.cyan(),
                created.id.dimmed()
            );
        }

        ProjectCommands::Update(args) => {
            access::require_admin(&user, "edit projects")?;
            let update = ProjectUpdate {
                name: args.name,
                description: args.description,
                status: args.status.as_deref().map(parse_status).transpose()?,
                start_date: args.start,
                end_date: args.end,
                progress: args.progress,
                team_members: args.team.as_deref().map(parse_list),
                priority: args.priority.as_deref().map(parse_priority).transpose()?,
                ..Default::default()
            };
            let updated = ctx
                .workspace
                .update_project(Some(&user.id), &args.project_id, update)?;
            ctx.commit(&[
                WebSocketMessage::ProjectUpdated {
                    project_id: updated.id.clone(),
                },
                WebSocketMessage::NotificationsChanged {
                    user_id: user.id.clone(),
                },
            ])
            .await?;

            println!(
                "{} Updated project: {} {}",
                "✓".green().bold(),
                updated.name.cyan(),
                format!("({}, {}%)", updated.status.as_str(), updated.progress).dimmed()
            );
        }

        ProjectCommands::Delete { project_id } => {
            access::require_admin(&user, "delete projects")?;
            let deletion = ctx.workspace.delete_project(&project_id)?;
            ctx.commit(&[WebSocketMessage::ProjectDeleted {
                project_id: project_id.clone(),
            }])
            .await?;

            println!(
                "{} Deleted project {} and {} task(s)",
                "✓".green().bold(),
                deletion.project.name.cyan(),
                deletion.removed_tasks
            );
        }
    }

    Ok(())
}

fn parse_status(s: &str) -> Result<ProjectStatus> {
    ProjectStatus::from_str(s).ok_or_else(|| anyhow!("Unknown project status: {}", s))
}

pub(crate) fn parse_priority(s: &str) -> Result<Priority> {
    Priority::from_str(s).ok_or_else(|| anyhow!("Unknown priority: {}", s))
}
