//! # GC Phase Times - Per-Worker Timing of Parallel Root Processing
//!
//! Low-overhead instrumentation for a parallel garbage collector. Every
//! GC worker records how long it spent in each root-processing phase
//! (thread stacks, code cache, string table, JNI handles, class loader
//! data, ...). At the end of a cycle the coordinating thread reads the
//! per-phase averages, prints them, and resets the registry for the next
//! cycle.
//!
//! ## Quick Start
//!
//! ```rust
//! use gc_phase_times::{GcParPhase, PhaseTimes};
//!
//! fn main() -> Result<(), gc_phase_times::PhaseTimesError> {
//!     let phase_times = PhaseTimes::new(4)?;
//!
//!     // On GC worker 0:
//!     {
//!         let _tracker = phase_times.track(GcParPhase::ThreadRoots, 0);
//!         // scan thread stacks...
//!     }
//!
//!     // On the coordinator, after every worker has finished:
//!     let avg = phase_times.average(GcParPhase::ThreadRoots);
//!     assert!(avg >= 0.0);
//!     phase_times.print();
//!     phase_times.reset_all();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!  worker 0        worker 1        worker N-1
//!  ┌────────┐      ┌────────┐      ┌────────┐
//!  │tracker │      │tracker │      │tracker │   drop -> record_time_secs
//!  └───┬────┘      └───┬────┘      └───┬────┘
//!      │ slot 0        │ slot 1        │ slot N-1
//!  ┌───▼───────────────▼───────────────▼────┐
//!  │ PhaseTimes: [WorkerDataArray; COUNT]   │
//!  └───────────────────┬────────────────────┘
//!                      │ average / print / reset (coordinator only)
//!                      ▼
//!                 GcLogger / GcMetrics
//! ```
//!
//! ### Thread Safety
//!
//! - `PhaseTimes` is `Send + Sync`; recording takes `&self` and no lock
//! - Each worker must own a distinct slot in `[0, max_gc_threads)` per cycle
//! - `average`, `reset`, `print` must run after all workers of the cycle
//!   have joined; the registry does not provide that barrier
//!
//! ## Modules
//!
//! - [`config`]: registry sizing and print options
//! - [`error`]: error types
//! - [`logging`]: logging sink for printed statistics
//! - [`phase`]: the closed set of timed phases
//! - [`stats`]: sample arrays, the registry, scoped trackers, metrics export

pub mod config;
pub mod error;
pub mod logging;
pub mod phase;
pub mod stats;

pub use config::PhaseTimesConfig;
pub use error::{PhaseTimesError, Result};
pub use phase::GcParPhase;
pub use stats::{ParPhaseTimesTracker, PhaseTimes};

/// Crate version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a registry from the environment-derived configuration
///
/// ```rust
/// let phase_times = gc_phase_times::init()?;
/// assert!(phase_times.max_gc_threads() >= 1);
/// # Ok::<(), gc_phase_times::PhaseTimesError>(())
/// ```
pub fn init() -> Result<PhaseTimes> {
    PhaseTimes::from_config(&PhaseTimesConfig::from_env())
}
