//! `tem landing` — single-landing entry, bulk import, and history.
//!
//! Bulk import reads a JSON array of landing submissions — the same shape
//! the API accepts — and submits each row through the ingest service, so
//! imported landings get the identical validation and recompute cascade
//! as interactive entry. A rejected row is reported and skipped; the rest
//! of the file still loads.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use tem_core::{LandingSubmission, VesselId};
use tem_engine::{EngineError, LandingStore};

use crate::context::CliContext;
use crate::recompute::print_outcome;

#[derive(Args, Debug)]
pub struct LandingArgs {
    #[command(subcommand)]
    command: LandingCommand,
}

#[derive(Subcommand, Debug)]
enum LandingCommand {
    /// Record one landing.
    Add {
        /// The delivering vessel (UUID).
        #[arg(long)]
        vessel: VesselId,

        /// Landing date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Landed weight in pounds.
        #[arg(long)]
        pounds: f64,

        /// Season year; defaults to the landing date's year.
        #[arg(long)]
        season: Option<i32>,

        /// Species code; defaults to POLL.
        #[arg(long)]
        species: Option<String>,

        /// Port of landing.
        #[arg(long)]
        port: Option<String>,

        /// Fish-ticket / delivery identifier.
        #[arg(long)]
        delivery: Option<String>,
    },

    /// Bulk-import landings from a JSON file.
    Import {
        /// Path to a JSON array of landing submissions.
        #[arg(long)]
        file: PathBuf,
    },

    /// List a vessel's landing history, newest first.
    List {
        /// The vessel (UUID).
        #[arg(long)]
        vessel: VesselId,
    },
}

pub fn run_landing(args: &LandingArgs, state_path: &Path) -> anyhow::Result<()> {
    let ctx = CliContext::load(state_path)?;
    match &args.command {
        LandingCommand::Add {
            vessel,
            date,
            pounds,
            season,
            species,
            port,
            delivery,
        } => {
            let receipt = ctx.engine.ingest.submit(LandingSubmission {
                vessel_id: vessel.clone(),
                landing_date: *date,
                pounds: *pounds,
                season_year: *season,
                species_code: species.clone(),
                landing_port: port.clone(),
                delivery_id: delivery.clone(),
            })?;
            ctx.save()?;
            println!(
                "accepted landing {} ({} lb on {})",
                receipt.landing.id.as_uuid(),
                receipt.landing.pounds,
                receipt.landing.landing_date
            );
            print_outcome(&receipt.outcome);
        }
        LandingCommand::Import { file } => {
            let rows = read_import_file(file)?;
            let total = rows.len();
            let mut accepted = 0usize;
            for (index, submission) in rows.into_iter().enumerate() {
                match ctx.engine.ingest.submit(submission) {
                    Ok(_) => accepted += 1,
                    Err(err) => {
                        tracing::warn!(row = index + 1, error = %err, "import row rejected");
                        println!("row {} rejected: {err}", index + 1);
                    }
                }
            }
            ctx.save()?;
            println!("imported {accepted} of {total} landing(s)");
        }
        LandingCommand::List { vessel } => {
            let landings = ctx
                .engine
                .stores()
                .landings
                .all_landings(vessel)
                .map_err(EngineError::from)?;
            if landings.is_empty() {
                println!("no landings on record");
                return Ok(());
            }
            for landing in landings {
                let marker = if landing.supersedes.is_some() {
                    " (correction)"
                } else {
                    ""
                };
                println!(
                    "{}  {}  {:>12.1} lb  {}{}",
                    landing.id.as_uuid(),
                    landing.landing_date,
                    landing.pounds,
                    landing.species_code,
                    marker
                );
            }
        }
    }
    Ok(())
}

/// Parse an import file into submissions without touching any store.
fn read_import_file(path: &Path) -> anyhow::Result<Vec<LandingSubmission>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading import file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing import file {}", path.display()))
}
