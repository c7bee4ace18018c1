//! FIDES Decision Core — Demo CLI
//!
//! Runs one or all of the three identity-verification scenarios. Each
//! scenario wires the real decision-core engines (liveness detector,
//! trust scoring engine, embedding hasher) together over synthetic
//! inputs.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- clean-pass
//!   cargo run -p demo -- screen-replay
//!   cargo run -p demo -- duplicate-identity

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scenarios;
mod synthetic;

use scenarios::{clean_pass, duplicate_identity, screen_replay};

// ── CLI definition ────────────────────────────────────────────────────────────

/// FIDES — identity verification decision core demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "FIDES decision core demo",
    long_about = "Runs FIDES verification scenarios showing liveness detection,\n\
                  trust scoring, and privacy-preserving duplicate detection."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three verification scenarios in sequence.
    RunAll,
    /// Scenario 1: clean first-time verification (auto-verified).
    CleanPass,
    /// Scenario 2: screen-replay attack caught by the spoof detector.
    ScreenReplay,
    /// Scenario 3: duplicate face demoted to manual review.
    DuplicateIdentity,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::CleanPass => clean_pass::run_scenario(),
        Command::ScreenReplay => screen_replay::run_scenario(),
        Command::DuplicateIdentity => duplicate_identity::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> fides_contracts::error::FidesResult<()> {
    clean_pass::run_scenario()?;
    screen_replay::run_scenario()?;
    duplicate_identity::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("FIDES — Identity Verification Decision Core");
    println!("===========================================");
    println!();
    println!("Decision pipeline per verification:");
    println!("  [1] Anti-spoof detector scores the selfie (texture, spectrum,");
    println!("      periodicity, chrominance, eye reflection)");
    println!("  [2] Trust scoring engine combines all provider signals into a");
    println!("      0-100 score and a decision with reasons and flags");
    println!("  [3] Embedding hasher derives salted exact and fuzzy digests");
    println!("      for duplicate-identity lookups — raw embeddings never leave");
    println!();
}
