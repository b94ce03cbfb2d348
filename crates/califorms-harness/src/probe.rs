//! The timing probe: elapsed cycles and checksum for one trial.
//!
//! A trial is `iterations` passes over `word[0..range_size]`, summing
//! every read into a wrapping 32-bit accumulator. The accumulator exists
//! to force the loads: it is fed through `black_box` and returned, so the
//! optimizer can neither elide the loop nor hoist it across the clock
//! reads. Its final value doubles as a correctness oracle: under
//! protection it must reflect the overridden bytes, not the stored ones.

use core::sync::atomic::{compiler_fence, Ordering};
use std::hint::black_box;

use califorms_core::{ArrayFixture, LaneProtector};
use serde::{Deserialize, Serialize};

use crate::clock::CycleClock;

/// One trial's measurement. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Cycles elapsed between the bracketing clock reads.
    pub elapsed: u64,
    /// Wrapping sum of every value read during the trial.
    pub checksum: u32,
}

/// Measures access workloads against a fixture.
#[derive(Debug)]
pub struct TimingProbe<C> {
    clock: C,
}

impl<C: CycleClock> TimingProbe<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Time `iterations` accumulation passes over `word[0..range_size]`.
    ///
    /// Overflow of the accumulator is intentional and not an error.
    /// Fatal configuration error if the range exceeds the fixture.
    pub fn measure<P: LaneProtector>(
        &mut self,
        fixture: &ArrayFixture<P>,
        range_size: usize,
        iterations: u32,
    ) -> Result<TrialResult, String> {
        if range_size > fixture.capacity() {
            return Err(format!(
                "measurement range {range_size} exceeds fixture capacity {}",
                fixture.capacity()
            ));
        }

        compiler_fence(Ordering::SeqCst);
        let t0 = self.clock.read();
        compiler_fence(Ordering::SeqCst);

        let mut sum: u32 = 0;
        for _ in 0..iterations {
            for j in 0..range_size {
                sum = sum.wrapping_add(fixture.raw_read(j));
            }
        }
        let checksum = black_box(sum);

        compiler_fence(Ordering::SeqCst);
        let t1 = self.clock.read();
        compiler_fence(Ordering::SeqCst);

        Ok(TrialResult {
            elapsed: t1 - t0,
            checksum,
        })
    }
}
