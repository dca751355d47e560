//! User management commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use synergy_core::access;
use synergy_core::user::{
    self,
    model::{Role, UserFilter, UserStatusFilter},
};
use synergy_db::WebSocketMessage;

use crate::context::{today, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users (admin)
    List(ListUserArgs),

    /// Show a user and their task statistics
    Show {
        /// User ID (defaults to you)
        user_id: Option<String>,
    },

    /// Ban a user (admin)
    Ban {
        user_id: String,
    },

    /// Lift a ban (admin)
    Unban {
        user_id: String,
    },

    /// Delete a user (admin)
    Delete {
        user_id: String,
    },
}

#[derive(Args)]
pub struct ListUserArgs {
    /// Match against name, email and title
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Role (admin, employee)
    #[arg(long)]
    pub role: Option<String>,

    /// Ban status (all, active, banned)
    #[arg(long, default_value = "all")]
    pub status: String,
}

pub async fn execute(cmd: UserCommands, ctx: &mut AppContext) -> Result<()> {
    let current = ctx.current_user()?;

    match cmd {
        UserCommands::List(args) => {
            access::require_admin(&current, "manage users")?;
            let role = args
                .role
                .as_deref()
                .map(|r| Role::from_str(r).ok_or_else(|| anyhow!("Unknown role: {}", r)))
                .transpose()?;
            let status = UserStatusFilter::from_str(&args.status)
                .ok_or_else(|| anyhow!("Unknown user status: {}", args.status))?;
            let filter = UserFilter {
                search: args.search,
                role,
                status,
            };
            output::print_users_table(&user::filter_users(&ctx.workspace.users, &filter));
        }

        UserCommands::Show { user_id } => {
            let id = user_id.unwrap_or_else(|| current.id.clone());
            if id != current.id {
                access::require_admin(&current, "view other users")?;
            }
            let ws = &ctx.workspace;
            let found = ws.user(&id)?;
            let stats = user::user_stats(found, &ws.tasks, &ws.projects, today());
            output::print_user(found, &stats);
        }

        UserCommands::Ban { user_id } => set_banned(ctx, &current.id, &user_id, true).await?,
        UserCommands::Unban { user_id } => set_banned(ctx, &current.id, &user_id, false).await?,

        UserCommands::Delete { user_id } => {
            access::require_admin(&current, "manage users")?;
            let removed = ctx.workspace.delete_user(&user_id)?;
            ctx.commit(&[WebSocketMessage::UserUpdated {
                user_id: removed.id.clone(),
            }])
            .await?;
            println!("{} Deleted user: {}", "✓".green().bold(), removed.name.cyan());
        }
    }

    Ok(())
}

async fn set_banned(ctx: &mut AppContext, actor_id: &str, user_id: &str, banned: bool) -> Result<()> {
    let actor = ctx.workspace.user(actor_id)?;
    access::require_admin(actor, "manage users")?;

    let target = ctx.workspace.user(user_id)?;
    if target.banned == banned {
        let state = if banned { "already banned" } else { "not banned" };
        println!("{} is {}", target.name.cyan(), state);
        return Ok(());
    }

    let updated = ctx.workspace.toggle_ban(user_id)?;
    ctx.commit(&[WebSocketMessage::UserUpdated {
        user_id: updated.id.clone(),
    }])
    .await?;
    ctx.sync_session(&updated).await?;

    let verb = if updated.banned { "Banned" } else { "Unbanned" };
    println!("{} {} {}", "✓".green().bold(), verb, updated.name.cyan());
    Ok(())
}
