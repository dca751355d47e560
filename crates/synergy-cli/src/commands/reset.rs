//! Reset command: drop saved snapshots and the session, back to seed data.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use synergy_core::{auth::Session, seed, store};
use synergy_db::WebSocketMessage;

use crate::context::AppContext;

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm destructive operation
    #[arg(long)]
    pub confirm: bool,
}

pub async fn execute(args: ResetArgs, ctx: &mut AppContext) -> Result<()> {
    if !args.confirm {
        println!("{}", "This will permanently discard:".red().bold());
        println!("  {} every saved change to users, projects and tasks", "•".red());
        println!("  {} notifications and discussions created since the seed", "•".red());
        println!("  {} the current login", "•".red());
        println!();
        println!("Run with {} to confirm.", "--confirm".bold());
        return Ok(());
    }

    let removed = store::reset_workspace(&ctx.db)?;
    Session::clear(&ctx.db)?;
    ctx.workspace = seed::workspace();
    ctx.session = Session::default();
    println!("  {} Removed {} snapshot(s)", "✓".green(), removed);

    ctx.commit(&[WebSocketMessage::SessionChanged, WebSocketMessage::DashboardRefresh])
        .await?;

    println!();
    println!("{}", "Workspace reset to seed data.".green().bold());
    Ok(())
}
