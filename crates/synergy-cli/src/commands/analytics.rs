//! Analytics command.

use anyhow::Result;
use synergy_core::analytics;

use crate::context::{today, AppContext};
use crate::output;

pub fn execute(ctx: &AppContext) -> Result<()> {
    ctx.current_user()?;
    let report = analytics::report(&ctx.workspace, today());
    output::print_analytics(&report);
    Ok(())
}
