//! Lightweight global metrics for the sieve pipeline.
//!
//! Потокобезопасные атомарные счётчики:
//! - base sieve (crossing-prime tables)
//! - segmented counter (segments, windows, crossing-off, scans)
//! - orchestrator (searches, located targets)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Base sieve -----
static CROSSING_TABLES_BUILT: AtomicU64 = AtomicU64::new(0);
static CROSSING_PRIMES_GENERATED: AtomicU64 = AtomicU64::new(0);

// ----- Segmented counter -----
static SEGMENTS_COUNTED: AtomicU64 = AtomicU64::new(0);
static WINDOWS_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static WINDOW_SLOTS_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static COMPOSITES_CROSSED: AtomicU64 = AtomicU64::new(0);
static PRIMES_COUNTED: AtomicU64 = AtomicU64::new(0);

// ----- Orchestrator -----
static SEARCHES_TOTAL: AtomicU64 = AtomicU64::new(0);
static TARGETS_LOCATED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    // Base sieve
    pub crossing_tables_built: u64,
    pub crossing_primes_generated: u64,

    // Segmented counter
    pub segments_counted: u64,
    pub windows_allocated: u64,
    pub window_slots_allocated: u64,
    pub composites_crossed: u64,
    pub primes_counted: u64,

    // Orchestrator
    pub searches_total: u64,
    pub targets_located: u64,
}

impl MetricsSnapshot {
    /// Доля кандидатов окна, выживших после вычёркивания.
    pub fn survivor_ratio(&self) -> f64 {
        if self.window_slots_allocated == 0 {
            0.0
        } else {
            self.primes_counted as f64 / self.window_slots_allocated as f64
        }
    }

    pub fn avg_window_slots(&self) -> f64 {
        if self.windows_allocated == 0 {
            0.0
        } else {
            self.window_slots_allocated as f64 / self.windows_allocated as f64
        }
    }
}

// ----- Recorders (Base sieve) -----
pub fn record_crossing_table(primes: usize) {
    CROSSING_TABLES_BUILT.fetch_add(1, Ordering::Relaxed);
    CROSSING_PRIMES_GENERATED.fetch_add(primes as u64, Ordering::Relaxed);
}

// ----- Recorders (Segmented counter) -----
pub fn record_segment() {
    SEGMENTS_COUNTED.fetch_add(1, Ordering::Relaxed);
}

/// Любое окно флагов: и базового решета, и сегментное.
pub fn record_window(slots: usize) {
    WINDOWS_ALLOCATED.fetch_add(1, Ordering::Relaxed);
    WINDOW_SLOTS_ALLOCATED.fetch_add(slots as u64, Ordering::Relaxed);
}

pub fn record_composites_crossed(marks: u64) {
    COMPOSITES_CROSSED.fetch_add(marks, Ordering::Relaxed);
}

pub fn record_primes_counted(count: u64) {
    PRIMES_COUNTED.fetch_add(count, Ordering::Relaxed);
}

// ----- Recorders (Orchestrator) -----
pub fn record_search() {
    SEARCHES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn record_target_located() {
    TARGETS_LOCATED.fetch_add(1, Ordering::Relaxed);
}

/// Take a consistent-enough snapshot (relaxed loads).
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        crossing_tables_built: CROSSING_TABLES_BUILT.load(Ordering::Relaxed),
        crossing_primes_generated: CROSSING_PRIMES_GENERATED.load(Ordering::Relaxed),

        segments_counted: SEGMENTS_COUNTED.load(Ordering::Relaxed),
        windows_allocated: WINDOWS_ALLOCATED.load(Ordering::Relaxed),
        window_slots_allocated: WINDOW_SLOTS_ALLOCATED.load(Ordering::Relaxed),
        composites_crossed: COMPOSITES_CROSSED.load(Ordering::Relaxed),
        primes_counted: PRIMES_COUNTED.load(Ordering::Relaxed),

        searches_total: SEARCHES_TOTAL.load(Ordering::Relaxed),
        targets_located: TARGETS_LOCATED.load(Ordering::Relaxed),
    }
}

/// Reset all counters to zero (useful in tests/benchmarks).
pub fn reset() {
    CROSSING_TABLES_BUILT.store(0, Ordering::Relaxed);
    CROSSING_PRIMES_GENERATED.store(0, Ordering::Relaxed);

    SEGMENTS_COUNTED.store(0, Ordering::Relaxed);
    WINDOWS_ALLOCATED.store(0, Ordering::Relaxed);
    WINDOW_SLOTS_ALLOCATED.store(0, Ordering::Relaxed);
    COMPOSITES_CROSSED.store(0, Ordering::Relaxed);
    PRIMES_COUNTED.store(0, Ordering::Relaxed);

    SEARCHES_TOTAL.store(0, Ordering::Relaxed);
    TARGETS_LOCATED.store(0, Ordering::Relaxed);
}
