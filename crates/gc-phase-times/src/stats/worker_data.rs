//! Worker Data Array - Per-Worker Samples
//!
//! Fixed-length array of per-worker `f64` samples (seconds).
//!
//! Each slot is owned by exactly one worker for the duration of a cycle,
//! so writes never contend and no lock guards the record path. Slots are
//! atomics only so that disjoint writes and the later aggregate reads are
//! data-race free; every access uses `Ordering::Relaxed` and visibility
//! for the coordinator comes from the external "all workers done" join.
//!
//! Slots are cache-line padded so neighbouring workers do not bounce the
//! same line while they are being timed.

use crossbeam::utils::CachePadded;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bit pattern of an unset slot. A NaN, so it never collides with a duration.
const UNSET: u64 = u64::MAX;

/// WorkerDataArray - one sample slot per GC worker
pub struct WorkerDataArray {
    slots: Box<[CachePadded<AtomicU64>]>,
}

impl WorkerDataArray {
    /// Create array with `length` unset slots
    pub fn new(length: usize) -> Self {
        let slots = (0..length)
            .map(|_| CachePadded::new(AtomicU64::new(UNSET)))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self { slots }
    }

    /// Number of worker slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store `value` in `worker`'s slot, replacing any earlier sample
    #[inline]
    pub fn set(&self, worker: usize, value: f64) {
        debug_assert!(
            worker < self.slots.len(),
            "worker slot {} out of range [0, {})",
            worker,
            self.slots.len()
        );
        debug_assert!(value >= 0.0, "negative sample {} for worker {}", value, worker);

        self.slots[worker].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Sample for `worker`, or None if nothing was recorded this cycle
    #[inline]
    pub fn get(&self, worker: usize) -> Option<f64> {
        let bits = self.slots[worker].load(Ordering::Relaxed);
        if bits == UNSET {
            None
        } else {
            Some(f64::from_bits(bits))
        }
    }

    /// Sample for `worker`, unset counted as 0.0
    #[inline]
    fn value_or_zero(&self, worker: usize) -> f64 {
        self.get(worker).unwrap_or(0.0)
    }

    /// Iterate all slots in worker order
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.len()).map(move |worker| self.get(worker))
    }

    /// Sum over every slot, unset slots counting as 0.0
    pub fn sum(&self) -> f64 {
        (0..self.len()).map(|worker| self.value_or_zero(worker)).sum()
    }

    /// Mean over all slots, not just the recorded ones.
    ///
    /// Workers that never ran the phase pull the mean down. The result
    /// reflects aggregate parallel cost across the configured worker
    /// count rather than cost per participating worker.
    pub fn average(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.sum() / self.len() as f64
    }

    /// Min/avg/max/diff/sum over the recorded slots only
    pub fn summary(&self) -> WorkerDataSummary {
        let mut summary = WorkerDataSummary::default();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in self.iter().flatten() {
            summary.count += 1;
            summary.sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if summary.count > 0 {
            summary.min = min;
            summary.max = max;
            summary.diff = max - min;
            summary.avg = summary.sum / summary.count as f64;
        }

        summary
    }

    /// Clear every slot back to unset. Does not reallocate.
    pub fn reset(&self) {
        for slot in self.slots.iter() {
            slot.store(UNSET, Ordering::Relaxed);
        }
    }
}

impl std::fmt::Debug for WorkerDataArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Summary over the workers that recorded a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkerDataSummary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub diff: f64,
    pub sum: f64,
    /// Number of workers that recorded a sample
    pub count: usize,
}
