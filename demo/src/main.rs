//! authgate reference scenarios demo CLI
//!
//! Runs one or all of the simulated authentication scenarios against the real
//! orchestrator, enrollment trigger, and outcome journal.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- no-hardware
//!   cargo run -p demo -- --tier legacy not-enrolled
//!   cargo run -p demo -- --config prompt.toml first-try

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use authgate_contracts::{authenticator::PlatformTier, error::AuthGateResult};
use authgate_policy::PolicySelector;
use authgate_sim::scenarios::{first_try, lockout, no_hardware, not_enrolled, retry_then_match};

// ── CLI definition ────────────────────────────────────────────────────────────

/// authgate: biometric authentication orchestrator demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "authgate reference scenarios demo",
    long_about = "Runs simulated authentication scenarios showing capability\n\
                  classification, the result stream, enrollment, and journal integrity."
)]
struct Cli {
    /// Platform tier the simulated device runs.
    #[arg(long, value_enum, default_value_t = TierArg::Modern, global = true)]
    tier: TierArg,

    /// Prompt configuration TOML. Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum TierArg {
    Legacy,
    Modern,
}

impl From<TierArg> for PlatformTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Legacy => PlatformTier::Legacy,
            TierArg::Modern => PlatformTier::Modern,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// Scenario A: no biometric sensor.
    NoHardware,
    /// Scenario B: the first touch matches.
    FirstTry,
    /// Scenario C: two rejections, then a match.
    RetryThenMatch,
    /// Scenario D: nothing enrolled.
    NotEnrolled,
    /// Scenario E: repeated rejections end in a lockout.
    Lockout,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    match run(cli).await {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn run(cli: Cli) -> AuthGateResult<()> {
    let selector = match &cli.config {
        Some(path) => {
            let selector = PolicySelector::from_file(path)?;
            info!(path = %path.display(), "loaded prompt configuration");
            selector
        }
        None => PolicySelector::default(),
    };
    let tier = PlatformTier::from(cli.tier);

    match cli.command {
        Command::RunAll => {
            no_hardware::run_scenario(tier, &selector).await?;
            first_try::run_scenario(tier, &selector).await?;
            retry_then_match::run_scenario(tier, &selector).await?;
            not_enrolled::run_scenario(tier, &selector).await?;
            lockout::run_scenario(tier, &selector).await?;
        }
        Command::NoHardware => {
            no_hardware::run_scenario(tier, &selector).await?;
        }
        Command::FirstTry => {
            first_try::run_scenario(tier, &selector).await?;
        }
        Command::RetryThenMatch => {
            retry_then_match::run_scenario(tier, &selector).await?;
        }
        Command::NotEnrolled => {
            not_enrolled::run_scenario(tier, &selector).await?;
        }
        Command::Lockout => {
            lockout::run_scenario(tier, &selector).await?;
        }
    }

    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("authgate — Biometric Authentication Orchestrator");
    println!("Simulated Device Demo");
    println!("================================================");
    println!();
    println!("Per request:");
    println!("  [1] Claim the single prompt slot (concurrent requests are rejected)");
    println!("  [2] Classify device capability against the requested authenticators");
    println!("  [3] Non-ready: publish the matching outcome, prompt never shown");
    println!("  [4] Ready: present the prompt, forward each platform signal to the stream");
    println!("  [5] Observers: enrollment trigger and SHA-256 outcome journal");
    println!();
}
