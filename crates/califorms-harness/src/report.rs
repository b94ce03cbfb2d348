//! Result records, sinks, and report rendering.
//!
//! The harness emits two record shapes: one per trial (immediately, for
//! per-run visibility) and one per configuration aggregate. A sink is
//! best-effort and never fails observably to the measurement path.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::sweep::AggregateResult;

/// One trial, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Configuration label (e.g. `size-1024`).
    pub label: String,
    /// Words accessed per pass.
    pub size: usize,
    /// Run index within the configuration, starting at 1.
    pub run: u32,
    /// Elapsed cycles.
    pub cycles: u64,
    /// Wrapping sum of every value read.
    pub checksum: u32,
}

/// One configuration's aggregate, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub label: String,
    pub size: usize,
    pub runs: u32,
    /// Truncating integer mean of the per-run cycle counts.
    pub mean_cycles: u64,
}

/// High 32 bits of a cycle count, as the original device log splits it.
#[inline]
#[must_use]
pub fn cycles_high(cycles: u64) -> u32 {
    (cycles >> 32) as u32
}

/// Low 32 bits of a cycle count.
#[inline]
#[must_use]
pub fn cycles_low(cycles: u64) -> u32 {
    (cycles & 0xFFFF_FFFF) as u32
}

/// Where records go. Shared by reference between the driver and whoever
/// reads the results afterwards, hence `&self` receivers.
pub trait ReportSink {
    fn trial(&self, record: &TrialRecord);
    fn aggregate(&self, record: &AggregateRecord);
}

/// Prints structured key=value lines, one per record.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn trial(&self, r: &TrialRecord) {
        println!(
            "TRIAL label={} size={} run={} cycles={} cycles_high={} cycles_low={} checksum={}",
            r.label,
            r.size,
            r.run,
            r.cycles,
            cycles_high(r.cycles),
            cycles_low(r.cycles),
            r.checksum
        );
    }

    fn aggregate(&self, r: &AggregateRecord) {
        println!(
            "AGGREGATE label={} size={} runs={} mean_cycles={}",
            r.label, r.size, r.runs, r.mean_cycles
        );
    }
}

/// Buffers records in memory, for tests and report rendering.
#[derive(Debug, Default)]
pub struct MemorySink {
    trials: Mutex<Vec<TrialRecord>>,
    aggregates: Mutex<Vec<AggregateRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn trials(&self) -> Vec<TrialRecord> {
        self.trials.lock().clone()
    }

    #[must_use]
    pub fn aggregates(&self) -> Vec<AggregateRecord> {
        self.aggregates.lock().clone()
    }
}

impl ReportSink for MemorySink {
    fn trial(&self, record: &TrialRecord) {
        self.trials.lock().push(record.clone());
    }

    fn aggregate(&self, record: &AggregateRecord) {
        self.aggregates.lock().push(record.clone());
    }
}

/// A finished sweep, renderable as markdown or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Report title.
    pub title: String,
    /// Scenario that produced it (baseline, sweep, compare).
    pub scenario: String,
    /// Per-configuration aggregates in sweep order.
    pub aggregates: Vec<AggregateResult>,
}

impl SweepReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Scenario: {}\n\n", self.scenario));
        out.push_str("| Label | Size | Runs | Mean cycles | Checksum |\n");
        out.push_str("|-------|------|------|-------------|----------|\n");
        for agg in &self.aggregates {
            let checksum = agg
                .trials
                .first()
                .map_or_else(|| String::from("-"), |t| format!("0x{:08X}", t.checksum));
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                agg.label,
                agg.size,
                agg.trials.len(),
                agg.mean_cycles,
                checksum
            ));
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
