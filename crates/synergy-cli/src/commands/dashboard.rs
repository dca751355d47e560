//! Dashboard command.

use anyhow::Result;
use synergy_core::dashboard;

use crate::context::{today, AppContext};
use crate::output;

pub fn execute(ctx: &AppContext) -> Result<()> {
    let user = ctx.current_user()?;
    let stats = dashboard::dashboard(&ctx.workspace, &user, today());
    output::print_dashboard(&user, &stats, &ctx.workspace);
    Ok(())
}
