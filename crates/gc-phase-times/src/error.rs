//! Error Module - Phase Times Error Types
//!
//! Defines the error types used by the phase timing registry.
//!
//! # Error Categories
//!
//! ## Construction Errors
//! - `InvalidWorkerCount` - registry sized for zero workers
//! - `Configuration` - invalid configuration values
//!
//! ## Lookup Errors
//! - `UnknownPhase` - a phase name that is not part of `GcParPhase`
//!
//! Recording, averaging and resetting never return errors. Their
//! preconditions (valid phase, worker slot in range, non-negative
//! duration) are caller contracts checked with `debug_assert!`.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for phase timing operations
///
/// # Examples
///
/// ```rust
/// use gc_phase_times::error::PhaseTimesError;
/// use gc_phase_times::PhaseTimes;
///
/// match PhaseTimes::new(0) {
///     Err(PhaseTimesError::InvalidWorkerCount(n)) => assert_eq!(n, 0),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Error)]
pub enum PhaseTimesError {
    /// Registry sized for an invalid number of GC workers
    ///
    /// **When returned:** `max_gc_threads` is zero
    ///
    /// **Recovery strategy:** Fix caller to pass the configured worker count
    #[error("Invalid GC worker count: {0} (must be > 0)")]
    InvalidWorkerCount(usize),

    /// Phase name not recognised
    ///
    /// **When returned:** Parsing a phase from a string that matches neither
    /// a variant identifier nor a printed label
    #[error("Unknown GC phase: {0:?}")]
    UnknownPhase(String),

    /// Configuration error
    ///
    /// **When returned:** `PhaseTimesConfig::validate` rejected the config
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

/// Result type alias for phase timing operations
pub type Result<T> = std::result::Result<T, PhaseTimesError>;
