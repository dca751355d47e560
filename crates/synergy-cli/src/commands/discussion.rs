//! Project discussion commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use synergy_core::access;
use synergy_core::discussion;
use synergy_db::WebSocketMessage;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum DiscussionCommands {
    /// Show the threads of a project
    List {
        project_id: String,
    },

    /// Start a thread
    Post {
        project_id: String,
        message: String,
    },

    /// Reply to a message
    Reply {
        discussion_id: String,
        message: String,
    },
}

pub async fn execute(cmd: DiscussionCommands, ctx: &mut AppContext) -> Result<()> {
    let user = ctx.current_user()?;

    match cmd {
        DiscussionCommands::List { project_id } => {
            let ws = &ctx.workspace;
            let project = ws.project(&project_id)?;
            access::require_project_access(&user, project)?;

            println!("{}", project.name.bold());
            let threads = discussion::threads_for_project(&ws.discussions, &project_id);
            if threads.is_empty() {
                println!("{}", "No discussions yet.".dimmed());
            }
            for thread in threads {
                output::print_discussion(thread, ws, 0);
            }
        }

        DiscussionCommands::Post { project_id, message } => {
            access::require_project_access(&user, ctx.workspace.project(&project_id)?)?;
            let post = ctx.workspace.post_discussion(&user.id, &project_id, &message)?;
            ctx.commit(&[WebSocketMessage::DiscussionPosted {
                project_id: post.project_id.clone(),
            }])
            .await?;
            println!("{} Posted ({})", "✓".green().bold(), post.id.dimmed());
        }

        DiscussionCommands::Reply {
            discussion_id,
            message,
        } => {
            let project_id = ctx.workspace.discussion(&discussion_id)?.project_id.clone();
            access::require_project_access(&user, ctx.workspace.project(&project_id)?)?;
            let reply = ctx
                .workspace
                .reply_to_discussion(&user.id, &discussion_id, &message)?;
            ctx.commit(&[WebSocketMessage::DiscussionPosted { project_id }])
                .await?;
            println!("{} Replied ({})", "✓".green().bold(), reply.id.dimmed());
        }
    }

    Ok(())
}
