//! Base sieve: crossing-prime tables.
//!
//! Classic Sieve of Eratosthenes over odd candidates only. Values stay in the
//! 32-bit domain, which is enough to cross off every composite below 2^64.

use log::debug;

use crate::bounds::prime_count_upper_bound;
use crate::error::{Result, SearchError};
use crate::metrics;
use crate::util::isqrt;
use crate::window::PrimalityWindow;

/// Past this candidate n*n no longer fits 32 bits; by then every composite
/// below a 32-bit limit has already been crossed by a smaller prime.
pub const CROSSING_CUTOFF: u64 = 1 << 16;

/// Ascending, duplicate-free primes below `limit`. Index 0 holds 2 whenever
/// `limit > 2`; it is kept for 1-based numbering and never used for crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeTable {
    limit: u32,
    primes: Vec<u32>,
}

impl PrimeTable {
    /// All primes `< limit`.
    pub fn below(limit: u32) -> Self {
        if limit <= 2 {
            metrics::record_crossing_table(0);
            return Self { limit, primes: Vec::new() };
        }

        let mut primes = Vec::with_capacity(prime_count_upper_bound(limit as f64) as usize + 1);
        primes.push(2);

        // slot i <-> 2i+1; slot 0 (value 1) is never looked at
        let mut window = PrimalityWindow::new(1, limit as u64);
        for slot in 1..window.len() {
            if !window.is_marked_prime(slot) {
                continue;
            }
            let n = window.value_at(slot);
            primes.push(n as u32);

            if n >= CROSSING_CUTOFF {
                continue;
            }
            window.cross_off(n * n, n);
        }

        metrics::record_crossing_table(primes.len());
        Self { limit, primes }
    }

    /// Table with every prime p such that p*p < `end`, i.e. enough to sieve
    /// any window whose upper edge is `end`.
    pub fn for_range_end(end: u64) -> Result<Self> {
        let limit = crossing_limit(end).ok_or(SearchError::RangeTooLarge { end })?;
        let table = Self::below(limit);
        debug!(
            "crossing table for end={}: {} primes below {}",
            end,
            table.len(),
            limit
        );
        Ok(table)
    }

    /// true, если таблицы хватает для окна с верхней границей `end`.
    pub fn covers(&self, end: u64) -> bool {
        end <= 1 || self.limit as u64 > isqrt(end - 1)
    }

    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.primes
    }

    pub fn first(&self) -> Option<u32> {
        self.primes.first().copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.primes.last().copied()
    }

    /// Odd entries only — the primes actually used to cross off windows.
    pub fn crossing(&self) -> &[u32] {
        match self.primes.first() {
            Some(2) => &self.primes[1..],
            _ => &self.primes,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.primes.iter().copied()
    }
}

/// Exclusive sieve limit for windows ending at `end`: isqrt(end-1) + 1.
/// None when it would leave the 32-bit domain.
pub fn crossing_limit(end: u64) -> Option<u32> {
    if end <= 1 {
        return Some(1);
    }
    u32::try_from(isqrt(end - 1) + 1).ok()
}
