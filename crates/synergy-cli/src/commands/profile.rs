//! Profile commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use synergy_core::profile::ProfileUpdate;
use synergy_core::user;
use synergy_db::WebSocketMessage;

use crate::context::{today, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show,

    /// Edit your profile
    Update(UpdateProfileArgs),
}

#[derive(Args)]
pub struct UpdateProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub about: Option<String>,

    /// Comma-separated skills
    #[arg(long)]
    pub skills: Option<String>,
}

impl From<UpdateProfileArgs> for ProfileUpdate {
    fn from(args: UpdateProfileArgs) -> Self {
        Self {
            name: args.name,
            title: args.title,
            department: args.department,
            phone: args.phone,
            location: args.location,
            about: args.about,
            skills: args.skills,
        }
    }
}

pub async fn execute(cmd: ProfileCommands, ctx: &mut AppContext) -> Result<()> {
    let current = ctx.current_user()?;

    match cmd {
        ProfileCommands::Show => {
            let ws = &ctx.workspace;
            let stats = user::user_stats(&current, &ws.tasks, &ws.projects, today());
            output::print_user(&current, &stats);
        }

        ProfileCommands::Update(args) => {
            let updated = ctx.workspace.update_profile(&current.id, args.into())?;
            ctx.commit(&[WebSocketMessage::UserUpdated {
                user_id: updated.id.clone(),
            }])
            .await?;
            ctx.sync_session(&updated).await?;
            println!("{} Profile updated", "✓".green().bold());
        }
    }

    Ok(())
}
