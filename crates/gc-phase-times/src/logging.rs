//! GC Phase Times Logging
//!
//! Sink for the per-cycle phase statistics produced by
//! [`PhaseTimes::print`](crate::PhaseTimes::print).
//!
//! Log Levels:
//! - INFO: per-cycle phase table header and one row per phase
//!
//! The most recent events are kept in memory (up to `max_events`, oldest
//! dropped first) so the cycle driver can inspect what was printed. Events
//! are echoed to the console either as human-readable lines or JSON.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Log level for GC phase events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// GC phase event types
#[derive(Debug, Clone, PartialEq)]
pub enum GcEvent {
    /// Start of a phase table
    ParPhasesStart { max_gc_threads: usize },

    /// One phase's statistics for the current cycle
    ParPhase {
        phase: String,
        /// Mean over all configured workers (ms)
        avg_ms: f64,
        /// Min over workers that recorded (ms)
        min_ms: f64,
        /// Max over workers that recorded (ms)
        max_ms: f64,
        /// Sum over workers that recorded (ms)
        sum_ms: f64,
        /// Workers that recorded a sample
        workers_recorded: usize,
        /// Per-worker samples (ms), present when per-worker printing is on
        per_worker_ms: Option<Vec<Option<f64>>>,
    },
}

/// GC Logger configuration
#[derive(Debug, Clone)]
pub struct GcLoggerConfig {
    /// Minimum log level
    pub level: LogLevel,

    /// Enable console output
    pub console: bool,

    /// Enable JSON format
    pub json: bool,

    /// Enable timestamps
    pub timestamps: bool,

    /// Events retained in memory; older events are dropped first
    pub max_events: usize,
}

impl Default for GcLoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
            json: false,
            timestamps: true,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

/// Default event retention: a few dozen cycles of phase tables
pub const DEFAULT_MAX_EVENTS: usize = 1024;

/// GC Logger - sink for phase statistics
pub struct GcLogger {
    config: GcLoggerConfig,
    events: Mutex<VecDeque<(Instant, GcEvent)>>,
    enabled: AtomicBool,
}

impl GcLogger {
    /// Create new GC logger
    pub fn new(config: GcLoggerConfig) -> Self {
        Self {
            config,
            events: Mutex::new(VecDeque::new()),
            enabled: AtomicBool::new(true),
        }
    }

    /// Logger that records events without writing to the console
    pub fn quiet() -> Self {
        Self::new(GcLoggerConfig {
            console: false,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &GcLoggerConfig {
        &self.config
    }

    /// Enable logging
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Disable logging
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Log a GC event
    pub fn log(&self, event: GcEvent) {
        if !self.is_enabled() {
            return;
        }

        if event_level(&event) > self.config.level {
            return;
        }

        if self.config.console {
            self.output_console(&event);
        }

        if self.config.max_events == 0 {
            return;
        }

        let mut events = self.events.lock();
        while events.len() >= self.config.max_events {
            events.pop_front();
        }
        events.push_back((Instant::now(), event));
    }

    fn output_console(&self, event: &GcEvent) {
        let line = if self.config.json {
            format_json(event)
        } else {
            format_human(event)
        };

        if self.config.timestamps {
            let now = chrono::Local::now();
            println!("[{}] {}", now.format("%Y-%m-%d %H:%M:%S%.3f"), line);
        } else {
            println!("{}", line);
        }
    }

    /// Get retained events, oldest first
    pub fn get_events(&self) -> Vec<(Instant, GcEvent)> {
        self.events.lock().iter().cloned().collect()
    }

    /// Clear all events
    pub fn clear_events(&self) {
        self.events.lock().clear();
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }
}

impl Default for GcLogger {
    fn default() -> Self {
        Self::new(GcLoggerConfig::default())
    }
}

/// Get log level for event
fn event_level(event: &GcEvent) -> LogLevel {
    match event {
        GcEvent::ParPhasesStart { .. } | GcEvent::ParPhase { .. } => LogLevel::Info,
    }
}

/// Human-readable rendering of an event
pub fn format_human(event: &GcEvent) -> String {
    match event {
        GcEvent::ParPhasesStart { max_gc_threads } => {
            format!("[GC] Parallel phases ({} workers):", max_gc_threads)
        },
        GcEvent::ParPhase {
            phase,
            avg_ms,
            min_ms,
            max_ms,
            sum_ms,
            workers_recorded,
            per_worker_ms,
        } => {
            let mut line = format!(
                "[GC]   {:<26} Avg: {:8.3}ms, Min: {:8.3}ms, Max: {:8.3}ms, Sum: {:8.3}ms, Workers: {}",
                format!("{}:", phase),
                avg_ms,
                min_ms,
                max_ms,
                sum_ms,
                workers_recorded
            );

            if let Some(samples) = per_worker_ms {
                let rendered: Vec<String> = samples
                    .iter()
                    .map(|s| match s {
                        Some(ms) => format!("{:.3}", ms),
                        None => "-".to_string(),
                    })
                    .collect();
                line.push_str(&format!(" [{}]", rendered.join(" ")));
            }

            line
        },
    }
}

/// JSON rendering of an event
pub fn format_json(event: &GcEvent) -> String {
    let json = match event {
        GcEvent::ParPhasesStart { max_gc_threads } => serde_json::json!({
            "type": "par_phases_start",
            "max_gc_threads": max_gc_threads
        }),
        GcEvent::ParPhase {
            phase,
            avg_ms,
            min_ms,
            max_ms,
            sum_ms,
            workers_recorded,
            per_worker_ms,
        } => serde_json::json!({
            "type": "par_phase",
            "phase": phase,
            "avg_ms": avg_ms,
            "min_ms": min_ms,
            "max_ms": max_ms,
            "sum_ms": sum_ms,
            "workers_recorded": workers_recorded,
            "per_worker_ms": per_worker_ms
        }),
    };

    json.to_string()
}

lazy_static::lazy_static! {
    static ref GLOBAL_LOGGER: Mutex<GcLogger> = Mutex::new(GcLogger::default());
}

/// Log a GC event to global logger
pub fn log_event(event: GcEvent) {
    GLOBAL_LOGGER.lock().log(event);
}

/// Run `f` against the global logger
pub fn with_global_logger<R>(f: impl FnOnce(&GcLogger) -> R) -> R {
    f(&GLOBAL_LOGGER.lock())
}

/// Configure global logger
pub fn configure_logger(config: GcLoggerConfig) {
    *GLOBAL_LOGGER.lock() = GcLogger::new(config);
}

/// Get global logger event count
pub fn get_event_count() -> usize {
    GLOBAL_LOGGER.lock().event_count()
}
