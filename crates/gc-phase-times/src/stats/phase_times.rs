//! Phase Times - Per-Worker Parallel Phase Registry
//!
//! Owns one [`WorkerDataArray`] per [`GcParPhase`], each sized to the
//! maximum number of GC workers. Workers record into their own slot;
//! the coordinating thread averages, prints and resets once every
//! worker of the cycle has finished.
//!
//! ## Concurrency
//!
//! `record_time_secs` takes `&self` and no lock. It relies on the worker
//! dispatcher handing each worker a distinct slot in
//! `[0, max_gc_threads)` for the cycle, so concurrent records touch
//! disjoint slots. `average`, `reset`, `print` and friends must only run
//! after the dispatcher's "all workers done" join; this type does not
//! provide that barrier.
//!
//! ## Averages
//!
//! `average` divides by `max_gc_threads`, not by the number of workers
//! that ran the phase. A phase touched by one of four workers reports a
//! quarter of that worker's time. This is aggregate parallel cost, not
//! per-participant cost, and is what adaptive worker sizing consumes.

use crate::config::PhaseTimesConfig;
use crate::error::{PhaseTimesError, Result};
use crate::logging::{self, GcEvent, GcLogger};
use crate::phase::GcParPhase;
use crate::stats::metrics::{GcMetrics, MetricValue};
use crate::stats::timer::ParPhaseTimesTracker;
use crate::stats::worker_data::{WorkerDataArray, WorkerDataSummary};
use serde::Serialize;

/// Registry of per-worker times for every parallel GC phase
pub struct PhaseTimes {
    max_gc_threads: usize,
    par_phases: [WorkerDataArray; GcParPhase::COUNT],
    print_per_worker: bool,
    verbose: bool,
}

impl PhaseTimes {
    /// Create registry with one slot per worker for every phase
    ///
    /// # Errors
    ///
    /// `InvalidWorkerCount` if `max_gc_threads` is zero.
    pub fn new(max_gc_threads: usize) -> Result<Self> {
        if max_gc_threads == 0 {
            return Err(PhaseTimesError::InvalidWorkerCount(max_gc_threads));
        }

        Ok(Self {
            max_gc_threads,
            par_phases: std::array::from_fn(|_| WorkerDataArray::new(max_gc_threads)),
            print_per_worker: false,
            verbose: false,
        })
    }

    /// Create registry from configuration
    pub fn from_config(config: &PhaseTimesConfig) -> Result<Self> {
        config.validate()?;

        let mut phase_times = Self::new(config.resolved_gc_threads())?;
        phase_times.print_per_worker = config.print_per_worker;
        phase_times.verbose = config.verbose;

        if phase_times.verbose {
            log::debug!(
                "PhaseTimes: {} phases x {} workers",
                GcParPhase::COUNT,
                phase_times.max_gc_threads
            );
        }

        Ok(phase_times)
    }

    /// Worker slots per phase
    pub fn max_gc_threads(&self) -> usize {
        self.max_gc_threads
    }

    /// Whether construction and per-cycle resets are logged
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Include per-worker samples when printing
    pub fn set_print_per_worker(&mut self, enabled: bool) {
        self.print_per_worker = enabled;
    }

    /// Record the time a phase took on `worker_id`, in seconds.
    ///
    /// A second record for the same `(phase, worker_id)` before `reset`
    /// replaces the first; samples are not accumulated.
    #[inline]
    pub fn record_time_secs(&self, phase: GcParPhase, worker_id: usize, secs: f64) {
        self.par_phases[phase.index()].set(worker_id, secs);
    }

    /// Recorded seconds for `(phase, worker_id)`, if any
    pub fn worker_time(&self, phase: GcParPhase, worker_id: usize) -> Option<f64> {
        self.par_phases[phase.index()].get(worker_id)
    }

    /// Samples for one phase
    pub fn worker_data(&self, phase: GcParPhase) -> &WorkerDataArray {
        &self.par_phases[phase.index()]
    }

    /// Mean seconds over all `max_gc_threads` slots; unrecorded slots count as zero
    pub fn average(&self, phase: GcParPhase) -> f64 {
        self.par_phases[phase.index()].average()
    }

    /// Clear all samples of `phase` for the next cycle
    pub fn reset(&self, phase: GcParPhase) {
        self.par_phases[phase.index()].reset();
    }

    /// Clear every phase for the next cycle
    pub fn reset_all(&self) {
        for phase in GcParPhase::iter() {
            self.reset(phase);
        }
        if self.verbose {
            log::debug!("PhaseTimes: reset {} phases", GcParPhase::COUNT);
        }
    }

    /// Start timing `phase` on `worker_id`; recorded when the tracker drops
    pub fn track(&self, phase: GcParPhase, worker_id: usize) -> ParPhaseTimesTracker<'_> {
        ParPhaseTimesTracker::new(self, phase, worker_id)
    }

    /// Run `f` as `worker_id`'s share of `phase`
    ///
    /// The sample is recorded even if `f` panics.
    pub fn time_phase<R, F>(&self, phase: GcParPhase, worker_id: usize, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _tracker = self.track(phase, worker_id);
        f()
    }

    /// Per-phase statistics in enumeration order
    pub fn summaries(&self) -> Vec<PhaseSummary> {
        GcParPhase::iter()
            .map(|phase| {
                let data = self.worker_data(phase);
                PhaseSummary {
                    phase: phase.ident(),
                    name: phase.name(),
                    average_secs: data.average(),
                    workers: data.summary(),
                }
            })
            .collect()
    }

    /// Events `print` emits, header first
    pub fn events(&self) -> Vec<GcEvent> {
        let mut events = Vec::with_capacity(GcParPhase::COUNT + 1);
        events.push(GcEvent::ParPhasesStart {
            max_gc_threads: self.max_gc_threads,
        });

        for phase in GcParPhase::iter() {
            let data = self.worker_data(phase);
            let summary = data.summary();

            events.push(GcEvent::ParPhase {
                phase: phase.name().to_string(),
                avg_ms: data.average() * 1000.0,
                min_ms: summary.min * 1000.0,
                max_ms: summary.max * 1000.0,
                sum_ms: summary.sum * 1000.0,
                workers_recorded: summary.count,
                per_worker_ms: self
                    .print_per_worker
                    .then(|| data.iter().map(|s| s.map(|secs| secs * 1000.0)).collect()),
            });
        }

        events
    }

    /// Print every phase's statistics to `logger`. Read-only.
    pub fn print_to(&self, logger: &GcLogger) {
        for event in self.events() {
            logger.log(event);
        }
    }

    /// Print every phase's statistics to the global logger. Read-only.
    pub fn print(&self) {
        logging::with_global_logger(|logger| self.print_to(logger));
    }

    /// Publish one average gauge per phase
    pub fn export_metrics(&self, metrics: &GcMetrics) {
        for phase in GcParPhase::iter() {
            metrics.add(
                format!("gc_phase_{}_avg_seconds", phase.metric_name()),
                MetricValue::Gauge(self.average(phase)),
            );
        }
    }
}

impl std::fmt::Debug for PhaseTimes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for phase in GcParPhase::iter() {
            map.entry(&phase, self.worker_data(phase));
        }
        map.finish()
    }
}

/// Statistics for one phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSummary {
    /// Variant identifier
    pub phase: &'static str,
    /// Printed label
    pub name: &'static str,
    /// Mean over all configured workers
    pub average_secs: f64,
    /// Summary over workers that recorded
    pub workers: WorkerDataSummary,
}
