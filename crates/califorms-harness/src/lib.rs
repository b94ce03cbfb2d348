//! Measurement harness for the califorms access-overhead benchmark.
//!
//! The pipeline: the [`sweep::SweepDriver`] re-initializes an
//! [`califorms_core::ArrayFixture`] per configuration, optionally applies
//! protection across a range, times repeated accumulation passes with the
//! [`probe::TimingProbe`], and emits per-run and aggregate records through
//! a [`report::ReportSink`].
//!
//! Everything is single-threaded and run-to-completion. Failures are
//! fatal: a configuration that does not fit the fixture, or a collaborator
//! that cannot be set up, aborts the whole run with `Err`; there is no
//! recoverable-error class in a benchmark.

pub mod check;
pub mod clock;
pub mod config;
pub mod overhead;
pub mod probe;
pub mod report;
pub mod sweep;

pub use clock::{CycleClock, SteppingClock, TickClock};
pub use config::{ProtectionSpec, SweepConfig};
pub use probe::{TimingProbe, TrialResult};
pub use report::{AggregateRecord, MemorySink, ReportSink, StdoutSink, SweepReport, TrialRecord};
pub use sweep::{AggregateResult, SweepDriver};
