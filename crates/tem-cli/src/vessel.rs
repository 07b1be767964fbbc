//! `tem vessel` — registration and listing.

use std::path::Path;

use clap::{Args, Subcommand};

use tem_engine::{EngineError, VesselStore};

use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct VesselArgs {
    #[command(subcommand)]
    command: VesselCommand,
}

#[derive(Subcommand, Debug)]
enum VesselCommand {
    /// Register a vessel with the program.
    Add {
        /// Vessel name (e.g., "F/V Pacific Star").
        #[arg(long)]
        name: String,

        /// Hull length in feet.
        #[arg(long)]
        hull_length_ft: f64,

        /// State or federal registration number.
        #[arg(long)]
        registration: Option<String>,
    },

    /// List registered vessels.
    List,
}

pub fn run_vessel(args: &VesselArgs, state_path: &Path) -> anyhow::Result<()> {
    let ctx = CliContext::load(state_path)?;
    match &args.command {
        VesselCommand::Add {
            name,
            hull_length_ft,
            registration,
        } => {
            let vessel =
                ctx.engine
                    .register_vessel(name, *hull_length_ft, registration.clone())?;
            ctx.save()?;
            println!("registered {} ({})", vessel.name, vessel.id);
        }
        VesselCommand::List => {
            let vessels = ctx
                .engine
                .stores()
                .vessels
                .list_vessels()
                .map_err(EngineError::from)?;
            if vessels.is_empty() {
                println!("no vessels registered");
                return Ok(());
            }
            for vessel in vessels {
                let registration = vessel.registration_number.as_deref().unwrap_or("-");
                println!(
                    "{}  {:<24}  {:>6.1} ft  {}",
                    vessel.id.as_uuid(),
                    vessel.name,
                    vessel.hull_length_ft,
                    registration
                );
            }
        }
    }
    Ok(())
}
