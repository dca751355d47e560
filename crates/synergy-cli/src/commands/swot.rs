//! SWOT command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use synergy_core::swot;

use crate::context::AppContext;
use crate::output;

#[derive(Args)]
pub struct SwotArgs {
    /// User ID to show (admins only; defaults to the first user)
    #[arg(short, long)]
    pub user: Option<String>,

    /// List the users you can view, filtered by name, title or department
    #[arg(short, long)]
    pub search: Option<String>,
}

pub fn execute(args: SwotArgs, ctx: &AppContext) -> Result<()> {
    let viewer = ctx.current_user()?;

    if let Some(term) = args.search {
        let users = swot::search(swot::available_users(&ctx.workspace, &viewer), &term);
        if users.is_empty() {
            println!("{}", "No users match.".dimmed());
        }
        for u in users {
            println!("{:<10} {} {}", u.id, u.name.cyan(), format!("{} · {}", u.title, u.department).dimmed());
        }
        return Ok(());
    }

    let selected = swot::select(&ctx.workspace, &viewer, args.user.as_deref());
    output::print_swot(&swot::report(selected));
    Ok(())
}
