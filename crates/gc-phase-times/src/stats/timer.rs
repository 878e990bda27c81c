//! GC Timer - Timing Utilities
//!
//! Utility for timing GC operations with `Instant` (monotonic,
//! nanosecond resolution on supported platforms).

use crate::phase::GcParPhase;
use crate::stats::phase_times::PhaseTimes;
use std::time::Duration;

/// GcTimer - timer for measuring GC operations
#[derive(Debug, Clone, Copy)]
pub struct GcTimer {
    start: std::time::Instant,
}

impl GcTimer {
    /// Create new timer
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get elapsed seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Get elapsed milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_secs() * 1000.0
    }
}

impl Default for GcTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped timer for one worker's share of a parallel phase
///
/// Starts timing on construction. On drop it records the elapsed seconds
/// into the registry for `(phase, worker_id)`. Drop runs on every exit
/// from the enclosing scope, including `?` returns and panics unwinding
/// through it, so exactly one sample is recorded per tracker.
///
/// A worker must not hold two trackers for the same phase at once: the
/// second drop would overwrite the first sample.
///
/// ```rust
/// use gc_phase_times::{GcParPhase, ParPhaseTimesTracker, PhaseTimes};
///
/// let phase_times = PhaseTimes::new(4)?;
/// {
///     let _tracker = ParPhaseTimesTracker::new(&phase_times, GcParPhase::ThreadRoots, 0);
///     // scan thread stacks...
/// }
/// assert!(phase_times.worker_time(GcParPhase::ThreadRoots, 0).is_some());
/// # Ok::<(), gc_phase_times::PhaseTimesError>(())
/// ```
#[must_use = "the phase is timed until the tracker is dropped"]
pub struct ParPhaseTimesTracker<'a> {
    phase_times: &'a PhaseTimes,
    phase: GcParPhase,
    worker_id: usize,
    timer: GcTimer,
}

impl<'a> ParPhaseTimesTracker<'a> {
    pub fn new(phase_times: &'a PhaseTimes, phase: GcParPhase, worker_id: usize) -> Self {
        Self {
            phase_times,
            phase,
            worker_id,
            timer: GcTimer::new(),
        }
    }

    pub fn phase(&self) -> GcParPhase {
        self.phase
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }
}

impl<'a> Drop for ParPhaseTimesTracker<'a> {
    fn drop(&mut self) {
        let secs = self.timer.elapsed_secs();
        self.phase_times
            .record_time_secs(self.phase, self.worker_id, secs);
    }
}
