//! # tem CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tem_cli::assess::{run_assess, AssessArgs};
use tem_cli::landing::{run_landing, LandingArgs};
use tem_cli::recompute::{run_recompute, RecomputeArgs};
use tem_cli::serve::{run_serve, ServeArgs};
use tem_cli::status::{run_status, StatusArgs};
use tem_cli::vessel::{run_vessel, VesselArgs};

/// TEM Stack CLI — trawl trip-limit compliance toolchain.
///
/// Registers vessels, records and imports landings, recomputes four-trip
/// windows, reports compliance standing, assesses penalties, and serves
/// the HTTP API. State lives in a JSON snapshot file.
#[derive(Parser, Debug)]
#[command(name = "tem", version, about)]
struct Cli {
    /// Path to the JSON state snapshot.
    #[arg(long, global = true, default_value = "tem-state.json")]
    state: PathBuf,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Vessel registration and listing.
    Vessel(VesselArgs),

    /// Landing entry, bulk import, and history listing.
    Landing(LandingArgs),

    /// Rebuild every four-trip window for a vessel.
    Recompute(RecomputeArgs),

    /// Current compliance standing for a vessel.
    Status(StatusArgs),

    /// Assess and record the vessel's current penalty.
    Assess(AssessArgs),

    /// Serve the HTTP API over the snapshot state.
    Serve(ServeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Vessel(args) => run_vessel(&args, &cli.state),
        Commands::Landing(args) => run_landing(&args, &cli.state),
        Commands::Recompute(args) => run_recompute(&args, &cli.state),
        Commands::Status(args) => run_status(&args, &cli.state),
        Commands::Assess(args) => run_assess(&args, &cli.state),
        Commands::Serve(args) => run_serve(&args, &cli.state),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(1)
        }
    }
}
