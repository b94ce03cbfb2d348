//! CLI entrypoint for the califorms benchmark harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use califorms_core::ArrayFixture;
use califorms_harness::config::{baseline_sweep, default_sweep, MAX_ARRAY_WORDS};
use califorms_harness::report::{cycles_high, cycles_low};
use califorms_harness::{check, overhead, StdoutSink, SweepDriver, SweepReport};

#[cfg(target_arch = "x86_64")]
use califorms_harness::clock::TscClock as DefaultClock;
#[cfg(not(target_arch = "x86_64"))]
use califorms_harness::clock::TickClock as DefaultClock;

/// Access-overhead benchmarks for byte-granular califorms protection.
#[derive(Debug, Parser)]
#[command(name = "califorms-harness")]
#[command(about = "Cycle benchmarks for byte-granular memory protection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify lane addressing and the protection primitive's contract.
    Check,
    /// Run the sweep matrix with no protection applied.
    Baseline {
        /// Output report path (markdown; a .json sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Run the sweep matrix with the default protection applied.
    Sweep {
        /// Output report path (markdown; a .json sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Measure one range unprotected, then protected, and report the
    /// overhead.
    Compare,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            check::verify_lane_access()?;
            let mut fixture = ArrayFixture::with_capacity(MAX_ARRAY_WORDS);
            check::verify_protection(&mut fixture)?;
            eprintln!("lane access and protection checks passed");
        }
        Command::Baseline { report } => {
            run_sweep("baseline", baseline_sweep(), report)?;
        }
        Command::Sweep { report } => {
            run_sweep("sweep", default_sweep(), report)?;
        }
        Command::Compare => {
            let mut fixture = ArrayFixture::with_capacity(MAX_ARRAY_WORDS);
            check::verify_protection(&mut fixture)?;
            let sink = StdoutSink;
            let cmp = overhead::run_comparison(&mut fixture, DefaultClock::default(), &sink)?;
            eprintln!(
                "unprotected: {} cycles ({}:{:08})",
                cmp.unprotected.elapsed,
                cycles_high(cmp.unprotected.elapsed),
                cycles_low(cmp.unprotected.elapsed)
            );
            eprintln!(
                "protected:   {} cycles ({}:{:08})",
                cmp.protected.elapsed,
                cycles_high(cmp.protected.elapsed),
                cycles_low(cmp.protected.elapsed)
            );
            eprintln!("overhead:    {:.2}%", cmp.overhead_pct);
        }
    }

    Ok(())
}

fn run_sweep(
    scenario: &str,
    configs: Vec<califorms_harness::SweepConfig>,
    report: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("running {scenario} matrix ({} configurations)", configs.len());

    // The fixture is allocated once, before any timing.
    let mut fixture = ArrayFixture::with_capacity(MAX_ARRAY_WORDS);
    check::verify_protection(&mut fixture)?;

    let sink = StdoutSink;
    let mut driver = SweepDriver::new(&mut fixture, DefaultClock::default(), &sink);
    let aggregates = driver.run(&configs)?;

    for agg in &aggregates {
        eprintln!(
            "{}: mean {} cycles over {} runs",
            agg.label,
            agg.mean_cycles,
            agg.trials.len()
        );
    }

    if let Some(report_path) = report {
        let doc = SweepReport {
            title: String::from("Califorms access-overhead report"),
            scenario: String::from(scenario),
            aggregates,
        };
        eprintln!("writing report to {}", report_path.display());
        std::fs::write(&report_path, doc.to_markdown())?;
        let json_path = report_path.with_extension("json");
        std::fs::write(&json_path, doc.to_json())?;
    }

    Ok(())
}
