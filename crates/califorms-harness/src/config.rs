//! Benchmark configuration: the sweep matrix.
//!
//! The configuration surface is compile-time constants plus constructors
//! for test-specific matrices. No flags, no environment variables: the
//! matrix is part of the benchmark's identity, and comparisons across
//! runs only make sense when it is fixed.

use serde::{Deserialize, Serialize};

/// Words the session fixture is allocated for (the largest sweep size).
pub const MAX_ARRAY_WORDS: usize = 4096;

/// Trials per configuration.
pub const DEFAULT_RUN_COUNT: u32 = 5;

/// The (size, iterations) matrix. Iteration counts keep
/// `size * iterations` near 256_000 so total work is comparable across
/// sizes.
pub const SIZE_ITERATIONS: [(usize, u32); 3] = [(256, 1000), (1024, 250), (4096, 62)];

/// Protection application for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionSpec {
    /// Index step between protected words (1 = every word).
    pub stride: usize,
    /// Bit positions to protect.
    pub mask: u32,
    /// Value presented on read for protected positions.
    pub pattern: u32,
}

/// The default protection the sweep applies: alternate words, whole word
/// forced, upper half carrying the forced bits.
pub const DEFAULT_PROTECTION: ProtectionSpec = ProtectionSpec {
    stride: 2,
    mask: 0xFFFF_FFFF,
    pattern: 0xFFFF_0000,
};

/// One cell of the benchmark matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Words accessed per pass.
    pub size: usize,
    /// Accumulation passes per trial.
    pub iterations: u32,
    /// Trials to average over.
    pub runs: u32,
    /// Protection to apply before the trials, if any.
    pub protection: Option<ProtectionSpec>,
}

impl SweepConfig {
    /// Configuration with no protection applied.
    #[must_use]
    pub fn unprotected(size: usize, iterations: u32, runs: u32) -> Self {
        Self {
            size,
            iterations,
            runs,
            protection: None,
        }
    }

    /// Configuration protected by `spec` before the trials.
    #[must_use]
    pub fn protected(size: usize, iterations: u32, runs: u32, spec: ProtectionSpec) -> Self {
        Self {
            size,
            iterations,
            runs,
            protection: Some(spec),
        }
    }

    /// Label used in records and reports, e.g. `size-1024`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("size-{}", self.size)
    }

    /// Check the configuration against a fixture capacity.
    ///
    /// Violations are fatal: the sweep aborts rather than measure a
    /// configuration it cannot honor.
    pub fn validate(&self, capacity: usize) -> Result<(), String> {
        if self.size > capacity {
            return Err(format!(
                "configured size {} exceeds fixture capacity {capacity}",
                self.size
            ));
        }
        if self.runs == 0 {
            return Err(format!("configuration {} has zero runs", self.label()));
        }
        if let Some(p) = &self.protection {
            if p.stride == 0 {
                return Err(format!(
                    "configuration {} has zero protection stride",
                    self.label()
                ));
            }
        }
        Ok(())
    }
}

/// The protected sweep: every matrix cell with [`DEFAULT_PROTECTION`].
#[must_use]
pub fn default_sweep() -> Vec<SweepConfig> {
    SIZE_ITERATIONS
        .iter()
        .map(|&(size, iterations)| {
            SweepConfig::protected(size, iterations, DEFAULT_RUN_COUNT, DEFAULT_PROTECTION)
        })
        .collect()
}

/// The baseline sweep: the same matrix with no protection applied.
#[must_use]
pub fn baseline_sweep() -> Vec<SweepConfig> {
    SIZE_ITERATIONS
        .iter()
        .map(|&(size, iterations)| SweepConfig::unprotected(size, iterations, DEFAULT_RUN_COUNT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_keeps_total_work_roughly_constant() {
        let work: Vec<usize> = SIZE_ITERATIONS
            .iter()
            .map(|&(size, iters)| size * iters as usize)
            .collect();
        let max = *work.iter().max().unwrap();
        let min = *work.iter().min().unwrap();
        // Soft bound: all cells within a few percent of each other.
        assert!(max - min <= max / 50, "work spread too wide: {work:?}");
    }

    #[test]
    fn matrix_fits_session_fixture() {
        for cfg in default_sweep().iter().chain(baseline_sweep().iter()) {
            cfg.validate(MAX_ARRAY_WORDS).unwrap();
        }
    }

    #[test]
    fn validate_rejects_oversized_configuration() {
        let cfg = SweepConfig::unprotected(MAX_ARRAY_WORDS + 1, 1, 1);
        assert!(cfg.validate(MAX_ARRAY_WORDS).is_err());
    }

    #[test]
    fn validate_rejects_zero_runs_and_zero_stride() {
        assert!(SweepConfig::unprotected(16, 1, 0).validate(16).is_err());
        let bad = SweepConfig::protected(
            16,
            1,
            1,
            ProtectionSpec {
                stride: 0,
                mask: 0,
                pattern: 0,
            },
        );
        assert!(bad.validate(16).is_err());
    }

    #[test]
    fn labels_name_the_size() {
        assert_eq!(SweepConfig::unprotected(256, 1000, 5).label(), "size-256");
    }
}
