//! Stats Module - Parallel Phase Timing
//!
//! Collects per-worker wall-clock time for each parallel root-processing
//! phase of a GC cycle:
//! - `worker_data`: lock-free per-worker sample arrays
//! - `phase_times`: the per-phase registry (record, average, reset, print)
//! - `timer`: scoped trackers that record on drop
//! - `metrics`: export of phase averages to monitoring systems

pub mod metrics;
pub mod phase_times;
pub mod timer;
pub mod worker_data;

pub use metrics::{GcMetrics, MetricValue};
pub use phase_times::{PhaseSummary, PhaseTimes};
pub use timer::{GcTimer, ParPhaseTimesTracker};
pub use worker_data::{WorkerDataArray, WorkerDataSummary};
