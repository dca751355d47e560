//! Notification commands for the logged-in user.

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use colored::Colorize;
use synergy_core::notification::{self, model::ReadFilter};
use synergy_db::WebSocketMessage;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List your notifications
    List {
        /// Read state (all, unread, read)
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Mark one notification read
    Read {
        notification_id: String,
    },

    /// Mark all your notifications read
    ReadAll,

    /// Delete a notification
    Delete {
        notification_id: String,
    },
}

pub async fn execute(cmd: NotificationCommands, ctx: &mut AppContext) -> Result<()> {
    let user = ctx.current_user()?;

    match cmd {
        NotificationCommands::List { filter } => {
            let read_filter = ReadFilter::from_str(&filter)
                .ok_or_else(|| anyhow!("Unknown filter: {} (expected all, unread or read)", filter))?;
            let ws = &ctx.workspace;
            let list = notification::filter(&ws.notifications, &user.id, read_filter);
            output::print_notifications(&list, ws.unread_count(&user.id));
        }

        NotificationCommands::Read { notification_id } => {
            require_owner(ctx, &notification_id, &user.id)?;
            ctx.workspace.mark_notification_read(&notification_id)?;
            ctx.commit(&[WebSocketMessage::NotificationsChanged {
                user_id: user.id.clone(),
            }])
            .await?;
            println!("{} Marked as read", "✓".green().bold());
        }

        NotificationCommands::ReadAll => {
            let changed = ctx.workspace.mark_all_notifications_read(&user.id);
            if changed == 0 {
                println!("{}", "Nothing unread.".dimmed());
                return Ok(());
            }
            ctx.commit(&[WebSocketMessage::NotificationsChanged {
                user_id: user.id.clone(),
            }])
            .await?;
            println!("{} Marked {} notification(s) as read", "✓".green().bold(), changed);
        }

        NotificationCommands::Delete { notification_id } => {
            require_owner(ctx, &notification_id, &user.id)?;
            let removed = ctx.workspace.delete_notification(&notification_id)?;
            ctx.commit(&[WebSocketMessage::NotificationsChanged {
                user_id: user.id.clone(),
            }])
            .await?;
            println!("{} Deleted: {}", "✓".green().bold(), removed.title.cyan());
        }
    }

    Ok(())
}

fn require_owner(ctx: &AppContext, notification_id: &str, user_id: &str) -> Result<()> {
    let found = ctx.workspace.notification(notification_id)?;
    if found.user_id != user_id {
        bail!("Permission denied: notification belongs to another user");
    }
    Ok(())
}
