// sweep_end_to_end_test.rs
// End-to-end scenario over the real monotonic clock: full matrix runs,
// per-run visibility, checksum stability, and aggregate math.

use califorms_core::ArrayFixture;
use califorms_harness::config::{baseline_sweep, MAX_ARRAY_WORDS};
use califorms_harness::{MemorySink, SweepConfig, SweepDriver, SweepReport, TickClock};

/// 1000 passes over the 0..=255 ramp.
const RAMP_256_X1000: u32 = 32_640_000;

#[test]
fn five_runs_of_size_256_have_identical_checksums_and_integer_mean() {
    let mut fixture = ArrayFixture::with_capacity(MAX_ARRAY_WORDS);
    let sink = MemorySink::new();
    let configs = vec![SweepConfig::unprotected(256, 1000, 5)];

    let mut driver = SweepDriver::new(&mut fixture, TickClock::new(), &sink);
    let aggregates = driver.run(&configs).expect("sweep must complete");

    assert_eq!(aggregates.len(), 1);
    let agg = &aggregates[0];
    assert_eq!(agg.trials.len(), 5);
    for trial in &agg.trials {
        assert_eq!(trial.checksum, RAMP_256_X1000);
    }

    let total: u64 = agg.trials.iter().map(|t| t.elapsed).sum();
    assert_eq!(agg.mean_cycles, total / 5);

    // Per-run visibility: one record per trial, then one aggregate.
    assert_eq!(sink.trials().len(), 5);
    assert_eq!(sink.aggregates().len(), 1);
    assert_eq!(sink.aggregates()[0].mean_cycles, agg.mean_cycles);
}

#[test]
fn work_scaled_matrix_stays_within_an_order_of_magnitude() {
    let mut fixture = ArrayFixture::with_capacity(MAX_ARRAY_WORDS);
    let sink = MemorySink::new();

    let mut driver = SweepDriver::new(&mut fixture, TickClock::new(), &sink);
    let aggregates = driver.run(&baseline_sweep()).expect("sweep must complete");

    // size * iterations is held near-constant, so mean cycles should be
    // comparable across sizes. Soft bound only: two orders of magnitude
    // of headroom for cache effects and host jitter.
    let means: Vec<u64> = aggregates.iter().map(|a| a.mean_cycles.max(1)).collect();
    let max = *means.iter().max().unwrap();
    let min = *means.iter().min().unwrap();
    assert!(
        max / min < 100,
        "mean cycles diverged across sizes: {means:?}"
    );
}

#[test]
fn report_renders_every_configuration() {
    let mut fixture = ArrayFixture::with_capacity(MAX_ARRAY_WORDS);
    let sink = MemorySink::new();
    let configs = vec![
        SweepConfig::unprotected(256, 10, 2),
        SweepConfig::unprotected(1024, 3, 2),
    ];

    let mut driver = SweepDriver::new(&mut fixture, TickClock::new(), &sink);
    let aggregates = driver.run(&configs).expect("sweep must complete");

    let report = SweepReport {
        title: String::from("Califorms access-overhead report"),
        scenario: String::from("baseline"),
        aggregates,
    };

    let md = report.to_markdown();
    assert!(md.contains("| size-256 |"));
    assert!(md.contains("| size-1024 |"));

    let parsed: SweepReport = serde_json::from_str(&report.to_json()).expect("valid JSON");
    assert_eq!(parsed.aggregates.len(), 2);
}
