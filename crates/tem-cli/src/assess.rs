//! `tem assess` — snapshot the current penalty into the immutable ledger.

use std::path::Path;

use clap::Args;

use tem_core::VesselId;

use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct AssessArgs {
    /// The vessel to assess (UUID).
    #[arg(long)]
    vessel: VesselId,

    /// Season year the assessment covers.
    #[arg(long)]
    season: i32,
}

pub fn run_assess(args: &AssessArgs, state_path: &Path) -> anyhow::Result<()> {
    let ctx = CliContext::load(state_path)?;
    let assessment = ctx.engine.deriver.assess_penalty(&args.vessel, args.season)?;
    ctx.save()?;
    println!(
        "assessed ${} against {} violation(s) for season {} (recorded {})",
        assessment.amount, assessment.violation_count, assessment.season_year,
        assessment.assessed_at
    );
    Ok(())
}
