//! `tem recompute` — rebuild every four-trip window for a vessel.

use std::path::Path;

use clap::Args;

use tem_core::VesselId;
use tem_engine::RecomputeOutcome;

use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct RecomputeArgs {
    /// The vessel to recompute (UUID).
    #[arg(long)]
    vessel: VesselId,
}

pub fn run_recompute(args: &RecomputeArgs, state_path: &Path) -> anyhow::Result<()> {
    let ctx = CliContext::load(state_path)?;
    let outcome = ctx.engine.calculator.recompute(&args.vessel)?;
    ctx.save()?;
    print_outcome(&outcome);
    Ok(())
}

/// Render a recompute outcome on stdout; shared with `tem landing add`.
pub(crate) fn print_outcome(outcome: &RecomputeOutcome) {
    match outcome {
        RecomputeOutcome::NotApplicable { hull_length_ft } => {
            println!("not applicable: hull length {hull_length_ft} ft is under the program cutoff");
        }
        RecomputeOutcome::InsufficientData {
            regular_trips,
            egregious_trips,
        } => {
            println!(
                "not enough data: {regular_trips} regular trip(s), {egregious_trips} egregious — four regular trips needed"
            );
        }
        RecomputeOutcome::Completed(summary) => {
            println!(
                "{} window(s), {} violation(s), {} egregious trip(s); latest window avg {:.2} lb ({})",
                summary.total_windows,
                summary.violation_count,
                summary.egregious_trips,
                summary.latest_window.average_pounds,
                summary.compliance_status
            );
            for key in &summary.failed_windows {
                println!("  warning: window {key} failed to persist; re-run recompute to retry");
            }
        }
    }
}
