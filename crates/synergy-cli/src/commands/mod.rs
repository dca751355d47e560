//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Settings;
use crate::context::AppContext;

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod discussion;
pub mod notification;
pub mod profile;
pub mod project;
pub mod reset;
pub mod serve;
pub mod swot;
pub mod task;
pub mod user;

/// SynergySphere - Team Collaboration Dashboard
#[derive(Parser)]
#[command(name = "synergy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the database and synergy.toml
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a config file (defaults to <data-dir>/synergy.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web dashboard
    Serve(serve::ServeArgs),

    /// Log in as a workspace member
    Login(auth::LoginArgs),

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show the dashboard summary
    Dashboard,

    /// Project management
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// User management (admin)
    #[command(subcommand)]
    User(user::UserCommands),

    /// Your notifications
    #[command(subcommand)]
    Notification(notification::NotificationCommands),

    /// Team and project analytics
    Analytics,

    /// SWOT analysis
    Swot(swot::SwotArgs),

    /// Your profile
    #[command(subcommand)]
    Profile(profile::ProfileCommands),

    /// Project discussions
    #[command(subcommand)]
    Discussion(discussion::DiscussionCommands),

    /// Discard saved changes and return to the seed data
    Reset(reset::ResetArgs),
}

impl Cli {
    pub async fn execute(self, settings: Settings) -> Result<()> {
        let open = AppContext::open;

        match self.command {
            Commands::Serve(args) => serve::execute(args, settings).await,
            Commands::Login(args) => auth::login(args, &mut open(settings)?).await,
            Commands::Logout => auth::logout(&mut open(settings)?).await,
            Commands::Whoami => auth::whoami(&open(settings)?),
            Commands::Dashboard => dashboard::execute(&open(settings)?),
            Commands::Project(cmd) => project::execute(cmd, &mut open(settings)?).await,
            Commands::Task(cmd) => task::execute(cmd, &mut open(settings)?).await,
            Commands::User(cmd) => user::execute(cmd, &mut open(settings)?).await,
            Commands::Notification(cmd) => notification::execute(cmd, &mut open(settings)?).await,
            Commands::Analytics => analytics::execute(&open(settings)?),
            Commands::Swot(args) => swot::execute(args, &open(settings)?),
            Commands::Profile(cmd) => profile::execute(cmd, &mut open(settings)?).await,
            Commands::Discussion(cmd) => discussion::execute(cmd, &mut open(settings)?).await,
            Commands::Reset(args) => reset::execute(args, &mut open(settings)?).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_status() {
        let cli = Cli::try_parse_from(["synergy", "task", "status", "7", "done"]).unwrap();
        match cli.command {
            Commands::Task(task::TaskCommands::Status(args)) => {
                assert_eq!(args.task_id, "7");
                assert_eq!(args.status, "done");
            }
            _ => panic!("expected task status"),
        }
    }

    #[test]
    fn test_parse_project_new_dates() {
        let cli = Cli::try_parse_from([
            "synergy", "project", "new", "Intranet", "--start", "2024-05-01", "--end", "2024-06-30",
            "--team", "2,3",
        ])
        .unwrap();
        match cli.command {
            Commands::Project(project::ProjectCommands::New(args)) => {
                assert_eq!(args.name, "Intranet");
                assert_eq!(args.start.to_string(), "2024-05-01");
                assert_eq!(args.team, "2,3");
            }
            _ => panic!("expected project new"),
        }
    }

    #[test]
    fn test_reset_requires_flag_to_confirm() {
        let cli = Cli::try_parse_from(["synergy", "reset"]).unwrap();
        assert!(matches!(cli.command, Commands::Reset(reset::ResetArgs { confirm: false })));
    }
}
