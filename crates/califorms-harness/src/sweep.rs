//! The sweep driver: runs the benchmark matrix end to end.
//!
//! A linear pipeline with no branching on data. Per configuration:
//! re-initialize the fixture, apply protection if configured (once, before
//! the repeated runs; reads do not disturb protection state), run the
//! probe `runs` times emitting each trial immediately, then emit the
//! aggregate mean. Any precondition violation aborts the whole sweep.

use califorms_core::{ArrayFixture, LaneProtector};
use serde::{Deserialize, Serialize};

use crate::clock::CycleClock;
use crate::config::SweepConfig;
use crate::probe::{TimingProbe, TrialResult};
use crate::report::{AggregateRecord, ReportSink, TrialRecord};

/// All trials of one configuration plus their mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub label: String,
    pub size: usize,
    /// Per-run results in run order.
    pub trials: Vec<TrialResult>,
    /// Truncating integer mean of the per-run cycle counts.
    pub mean_cycles: u64,
}

impl AggregateResult {
    fn from_trials(label: String, size: usize, trials: Vec<TrialResult>) -> Self {
        let total: u64 = trials.iter().map(|t| t.elapsed).sum();
        let mean_cycles = total / trials.len() as u64;
        Self {
            label,
            size,
            trials,
            mean_cycles,
        }
    }
}

/// Owns the fixture and clock for the duration of a sweep.
pub struct SweepDriver<'a, P, C, S> {
    fixture: &'a mut ArrayFixture<P>,
    probe: TimingProbe<C>,
    sink: &'a S,
}

impl<'a, P, C, S> SweepDriver<'a, P, C, S>
where
    P: LaneProtector,
    C: CycleClock,
    S: ReportSink,
{
    pub fn new(fixture: &'a mut ArrayFixture<P>, clock: C, sink: &'a S) -> Self {
        Self {
            fixture,
            probe: TimingProbe::new(clock),
            sink,
        }
    }

    /// Run every configuration in order, reporting as it goes.
    ///
    /// The whole matrix is validated up front: a configuration that does
    /// not fit the fixture fails the sweep before anything is measured.
    pub fn run(&mut self, configs: &[SweepConfig]) -> Result<Vec<AggregateResult>, String> {
        for config in configs {
            config.validate(self.fixture.capacity())?;
        }
        configs.iter().map(|c| self.run_config(c)).collect()
    }

    fn run_config(&mut self, config: &SweepConfig) -> Result<AggregateResult, String> {
        let label = config.label();

        self.fixture.initialize(config.size)?;
        if let Some(p) = &config.protection {
            self.fixture
                .protect_range(config.size, p.stride, p.mask, p.pattern)?;
        }

        let mut trials = Vec::with_capacity(config.runs as usize);
        for run in 1..=config.runs {
            let trial = self
                .probe
                .measure(self.fixture, config.size, config.iterations)?;
            self.sink.trial(&TrialRecord {
                label: label.clone(),
                size: config.size,
                run,
                cycles: trial.elapsed,
                checksum: trial.checksum,
            });
            trials.push(trial);
        }

        let aggregate = AggregateResult::from_trials(label, config.size, trials);
        self.sink.aggregate(&AggregateRecord {
            label: aggregate.label.clone(),
            size: aggregate.size,
            runs: config.runs,
            mean_cycles: aggregate.mean_cycles,
        });
        Ok(aggregate)
    }
}
