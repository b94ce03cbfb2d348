//! Unprotected vs protected comparison on one configuration.
//!
//! Measures the same access loop twice, once on a freshly initialized
//! range and once after protecting every word, and reports both cycle
//! counts plus the relative overhead.

use califorms_core::{ArrayFixture, LaneProtector};
use serde::{Deserialize, Serialize};

use crate::clock::CycleClock;
use crate::probe::{TimingProbe, TrialResult};
use crate::report::{ReportSink, TrialRecord};

/// Range size for the comparison.
pub const COMPARE_SIZE: usize = 1024;
/// Passes per measurement.
pub const COMPARE_ITERATIONS: u32 = 1000;
/// Protection applied between the two measurements: lanes 1 and 3 forced.
pub const COMPARE_MASK: u32 = 0xFF00_FF00;
pub const COMPARE_PATTERN: u32 = 0xFF00_FF00;

/// Both measurements and the derived overhead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadComparison {
    pub unprotected: TrialResult,
    pub protected: TrialResult,
    /// `(protected - unprotected) / unprotected`, in percent. Negative
    /// when the protected run happened to be faster (jitter).
    pub overhead_pct: f64,
}

/// Run the comparison, emitting both trials through `sink`.
pub fn run_comparison<P, C, S>(
    fixture: &mut ArrayFixture<P>,
    clock: C,
    sink: &S,
) -> Result<OverheadComparison, String>
where
    P: LaneProtector,
    C: CycleClock,
    S: ReportSink,
{
    let mut probe = TimingProbe::new(clock);

    fixture.initialize(COMPARE_SIZE)?;
    let unprotected = probe.measure(fixture, COMPARE_SIZE, COMPARE_ITERATIONS)?;
    sink.trial(&TrialRecord {
        label: String::from("compare-unprotected"),
        size: COMPARE_SIZE,
        run: 1,
        cycles: unprotected.elapsed,
        checksum: unprotected.checksum,
    });

    fixture.protect_range(COMPARE_SIZE, 1, COMPARE_MASK, COMPARE_PATTERN)?;
    let protected = probe.measure(fixture, COMPARE_SIZE, COMPARE_ITERATIONS)?;
    sink.trial(&TrialRecord {
        label: String::from("compare-protected"),
        size: COMPARE_SIZE,
        run: 1,
        cycles: protected.elapsed,
        checksum: protected.checksum,
    });

    let overhead_pct = if unprotected.elapsed == 0 {
        0.0
    } else {
        (protected.elapsed as f64 - unprotected.elapsed as f64) / unprotected.elapsed as f64
            * 100.0
    };

    Ok(OverheadComparison {
        unprotected,
        protected,
        overhead_pct,
    })
}
