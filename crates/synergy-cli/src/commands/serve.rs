//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to <data-dir>/serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, mut settings: Settings) -> Result<()> {
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(host) = args.host {
        settings.host = host;
    }

    let db_path = settings.database_path();
    let pool = Arc::new(synergy_db::init_pool(&db_path)?);
    let state = synergy_web::state::AppState::load(pool, settings.login_delay())?;

    let base = format!("{}:{}", settings.host, settings.port);
    println!();
    println!("  {} {}", "SynergySphere".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}", "Dashboard".green(), base);
    println!("  {}        http://{}/api", "API".green(), base);
    println!("  {}  ws://{}/ws", "WebSocket".green(), base);
    println!("  {}   {}", "Database".green(), db_path.display().to_string().dimmed());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    synergy_web::run_server(state, &settings.host, settings.port).await?;

    Ok(())
}
