//! `tem status` — current compliance standing for a vessel.

use std::path::Path;

use clap::Args;

use tem_core::VesselId;
use tem_engine::EngineError;

use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// The vessel (UUID).
    #[arg(long)]
    vessel: VesselId,
}

pub fn run_status(args: &StatusArgs, state_path: &Path) -> anyhow::Result<()> {
    let ctx = CliContext::load(state_path)?;
    match ctx.engine.deriver.compliance_status(&args.vessel) {
        Ok(report) => {
            println!("status:          {}", report.status);
            println!(
                "latest window:   {} to {} (computed {})",
                report.window_start, report.window_end, report.calculation_date
            );
            println!("latest average:  {:.2} lb", report.latest_average);
            println!("violations:      {}", report.violation_count);
            println!("penalty:         ${}", report.penalty_amount);
        }
        // Never produced a window: not the same as compliant.
        Err(EngineError::NoCalculation(_)) => {
            println!("no calculation on record for this vessel yet");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
