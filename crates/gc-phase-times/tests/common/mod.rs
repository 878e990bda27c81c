//! Test Utilities for the Phase Times Test Suite
//!
//! Fixtures and strict assertions shared by the integration tests.

#![allow(dead_code)]

use gc_phase_times::logging::{GcEvent, GcLogger, GcLoggerConfig};
use gc_phase_times::{GcParPhase, PhaseTimes};
use std::sync::Arc;

/// Default worker count for tests
pub const DEFAULT_WORKERS: usize = 4;

/// Tolerance for comparing sums of f64 samples
pub const EPSILON: f64 = 1e-12;

/// ============================================================================
/// PHASE TIMES FIXTURE
/// ============================================================================

/// Test fixture owning a shared registry and a quiet default-level logger
pub struct PhaseTimesFixture {
    pub phase_times: Arc<PhaseTimes>,
    pub logger: GcLogger,
}

impl PhaseTimesFixture {
    /// Create fixture with `DEFAULT_WORKERS` slots
    pub fn with_defaults() -> Self {
        Self::with_workers(DEFAULT_WORKERS)
    }

    /// Create fixture with custom worker count
    ///
    /// **Bug this finds:** Construction-time sizing bugs
    pub fn with_workers(workers: usize) -> Self {
        let phase_times = Arc::new(
            PhaseTimes::new(workers).expect("registry construction should succeed for workers > 0"),
        );
        let logger = GcLogger::new(GcLoggerConfig {
            console: false,
            ..Default::default()
        });

        Self { phase_times, logger }
    }

    /// Record `secs` for every phase on `worker`
    pub fn record_all_phases(&self, worker: usize, secs: f64) {
        for phase in GcParPhase::iter() {
            self.phase_times.record_time_secs(phase, worker, secs);
        }
    }

    /// Phase rows (header excluded) printed to the fixture logger
    pub fn printed_phases(&self) -> Vec<GcEvent> {
        self.logger
            .get_events()
            .into_iter()
            .map(|(_, event)| event)
            .filter(|event| matches!(event, GcEvent::ParPhase { .. }))
            .collect()
    }
}

/// ============================================================================
/// ASSERTIONS
/// ============================================================================

/// Assert two sample values are equal within `EPSILON`
pub fn assert_secs_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}s, got {}s",
        expected,
        actual
    );
}

/// Assert every phase averages zero
pub fn assert_all_phases_zero(phase_times: &PhaseTimes) {
    for phase in GcParPhase::iter() {
        assert_eq!(
            phase_times.average(phase),
            0.0,
            "{} should average zero",
            phase
        );
    }
}

/// Arithmetic mean over `max_gc_threads`, unrecorded slots counting as zero
pub fn expected_average(samples: &[f64], max_gc_threads: usize) -> f64 {
    samples.iter().sum::<f64>() / max_gc_threads as f64
}
