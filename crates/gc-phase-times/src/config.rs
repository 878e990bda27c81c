//! Configuration Module - Phase Timing Parameters
//!
//! Controls how the phase timing registry is sized and how it prints.

/// Configuration for the parallel phase timing registry
///
/// # Examples
///
/// ```rust
/// use gc_phase_times::PhaseTimesConfig;
///
/// // Use default configuration
/// let config = PhaseTimesConfig::default();
///
/// // Fixed worker count with per-worker breakdown
/// let config = PhaseTimesConfig {
///     max_gc_threads: Some(8),
///     print_per_worker: true,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PhaseTimesConfig {
    /// Maximum number of GC worker threads
    ///
    /// Every phase gets one sample slot per worker. Worker ids handed out
    /// by the dispatcher must fall in `[0, max_gc_threads)`.
    /// If None, resolves to the number of CPUs.
    ///
    /// Default: number of CPUs
    pub max_gc_threads: Option<usize>,

    /// Include per-worker samples when printing
    ///
    /// Default: false
    pub print_per_worker: bool,

    /// Enable verbose diagnostics
    ///
    /// Logs registry construction and per-cycle resets at debug level.
    /// Default: false
    pub verbose: bool,
}

impl Default for PhaseTimesConfig {
    fn default() -> Self {
        PhaseTimesConfig {
            max_gc_threads: Some(num_cpus::get().max(1)),
            print_per_worker: false,
            verbose: false,
        }
    }
}

impl PhaseTimesConfig {
    /// Validate configuration
    ///
    /// ```rust
    /// use gc_phase_times::PhaseTimesConfig;
    ///
    /// let config = PhaseTimesConfig {
    ///     max_gc_threads: Some(0),  // Invalid!
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threads) = self.max_gc_threads {
            if threads == 0 {
                return Err(ConfigError::InvalidGcThreads(
                    "max_gc_threads must be > 0".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Worker count the registry is sized for
    pub fn resolved_gc_threads(&self) -> usize {
        self.max_gc_threads
            .unwrap_or_else(|| num_cpus::get().max(1))
    }

    /// Build configuration from environment variables
    ///
    /// Overrides defaults with environment variables:
    /// - GC_PHASE_TIMES_MAX_THREADS
    /// - GC_PHASE_TIMES_PER_WORKER
    /// - GC_PHASE_TIMES_VERBOSE
    ///
    /// ```bash
    /// export GC_PHASE_TIMES_MAX_THREADS=8
    /// export GC_PHASE_TIMES_PER_WORKER=1
    /// ```
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_MAX_THREADS) {
            match val.parse::<usize>() {
                Ok(threads) => config.max_gc_threads = Some(threads),
                Err(e) => log::warn!("Ignoring {}={:?}: {}", ENV_MAX_THREADS, val, e),
            }
        }

        if let Some(val) = lookup(ENV_PER_WORKER) {
            config.print_per_worker = parse_flag(&val);
        }

        if let Some(val) = lookup(ENV_VERBOSE) {
            config.verbose = parse_flag(&val);
        }

        config
    }
}

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid GC threads: {0}")]
    InvalidGcThreads(String),
}

const ENV_MAX_THREADS: &str = "GC_PHASE_TIMES_MAX_THREADS";
const ENV_PER_WORKER: &str = "GC_PHASE_TIMES_PER_WORKER";
const ENV_VERBOSE: &str = "GC_PHASE_TIMES_VERBOSE";

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}
