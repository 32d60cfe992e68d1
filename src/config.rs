//! Centralized configuration for the Nth-prime search.
//!
//! Goals:
//! - Single place to collect tunables instead of threading loose arguments.
//! - SearchConfig::default() reproduces the classic sequential run (10 pieces).
//! - SearchBuilder / fluent `with_*` setters for callers (CLI flags, bench, tests).
//!
//! Tunables:
//! - pieces: how many equal pieces `[2, lower)` is split into; bounds the size
//!   of each counting window (peak memory ≈ (lower / pieces) / 2 flags).
//! - parallel: count the pieces on a rayon pool instead of one by one.
//! - threads: rayon pool size when parallel (0 = rayon default, one per core).

use std::fmt;

/// Default number of pieces for the counting pass.
pub const DEFAULT_PIECES: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of equal-width pieces for counting `[2, lower)` (>= 1).
    pub pieces: u64,

    /// Count the pieces concurrently (each worker owns its window).
    pub parallel: bool,

    /// Worker threads for the parallel pass; 0 means rayon's default.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pieces: DEFAULT_PIECES,
            parallel: false,
            threads: 0,
        }
    }
}

impl SearchConfig {
    /// Fluent setters (builder-style) to override specific fields.

    /// 0 is treated as 1 (a single piece).
    pub fn with_pieces(mut self, pieces: u64) -> Self {
        self.pieces = pieces.max(1);
        self
    }

    pub fn with_parallel(mut self, on: bool) -> Self {
        self.parallel = on;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Pieces actually used (never 0, even if the field was set directly).
    pub fn effective_pieces(&self) -> u64 {
        self.pieces.max(1)
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchConfig {{ pieces: {}, parallel: {}, threads: {} }}",
            self.effective_pieces(),
            self.parallel,
            if self.threads == 0 {
                "default".to_string()
            } else {
                self.threads.to_string()
            },
        )
    }
}

/// Lightweight builder that produces a SearchConfig.
#[derive(Clone, Debug, Default)]
pub struct SearchBuilder {
    cfg: SearchConfig,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pieces(mut self, pieces: u64) -> Self {
        self.cfg = self.cfg.with_pieces(pieces);
        self
    }

    pub fn parallel(mut self, on: bool) -> Self {
        self.cfg.parallel = on;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.cfg.threads = threads;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> SearchConfig {
        self.cfg
    }
}
