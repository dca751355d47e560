//! Login, logout and whoami.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use synergy_core::auth;

use crate::context::AppContext;

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    pub email: String,

    /// Password (prompted when omitted; any value is accepted)
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn login(args: LoginArgs, ctx: &mut AppContext) -> Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Signing in...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = auth::login(
        &ctx.workspace,
        &args.email,
        &password,
        ctx.settings.login_delay(),
    )
    .await;
    spinner.finish_and_clear();

    let user = result?;
    ctx.session.sign_in(user.clone());
    ctx.commit_session().await?;

    println!(
        "{} Logged in as {} {}",
        "✓".green().bold(),
        user.name.cyan(),
        format!("({})", user.role.as_str()).dimmed()
    );
    Ok(())
}

pub async fn logout(ctx: &mut AppContext) -> Result<()> {
    if !ctx.session.is_authenticated() {
        println!("{}", "Not logged in.".dimmed());
        return Ok(());
    }
    ctx.session.logout();
    ctx.commit_session().await?;
    println!("{} Logged out", "✓".green().bold());
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    let user = ctx.current_user()?;
    println!(
        "{} {} {}",
        user.name.cyan().bold(),
        user.email,
        format!("({}, id {})", user.role.as_str(), user.id).dimmed()
    );
    Ok(())
}
