//! Segmented counter: count (and optionally locate) primes in `[start, end)`.
//!
//! Works on any half-open window of the 64-bit domain given a crossing table
//! that covers √end. Memory is one odd-only window, O((end - start) / 2),
//! independent of how large `start` itself is.

use std::num::NonZeroU64;
use std::ops::Range;

use log::{debug, info};

use crate::error::Result;
use crate::metrics;
use crate::sieve::PrimeTable;
use crate::util::ordinal_suffix;
use crate::window::PrimalityWindow;

/// Result of one window: how many primes it holds and, if a target ordinal
/// was requested and the window had that many, the prime at that ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentCount {
    pub count: u64,
    pub located: Option<u64>,
}

/// Countdown to the requested ordinal; records the value exactly once.
#[derive(Debug, Clone, Copy)]
struct Target {
    remaining: u64,
    located: Option<u64>,
}

impl Target {
    fn new(nth: Option<NonZeroU64>) -> Self {
        Self {
            remaining: nth.map_or(0, NonZeroU64::get),
            located: None,
        }
    }

    #[inline]
    fn observe(&mut self, prime: u64) {
        if self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.located = Some(prime);
        }
    }
}

/// Sieves windows against a shared, read-only crossing table.
#[derive(Debug, Clone, Copy)]
pub struct SegmentedCounter<'a> {
    crossing: &'a PrimeTable,
}

impl<'a> SegmentedCounter<'a> {
    pub fn new(crossing: &'a PrimeTable) -> Self {
        Self { crossing }
    }

    pub fn crossing(&self) -> &'a PrimeTable {
        self.crossing
    }

    /// Count primes in `range`; with `nth = Some(k)` also locate the k-th
    /// prime of the window (1-based, 2 included when the window holds it).
    ///
    /// `located` stays `None` when the window holds fewer than k primes.
    pub fn count(&self, range: Range<u64>, nth: Option<NonZeroU64>) -> SegmentCount {
        let Range { mut start, end } = range;
        debug_assert!(
            self.crossing.covers(end),
            "crossing table below {} is too small for end={}",
            self.crossing.limit(),
            end
        );

        match nth {
            Some(k) => info!(
                "- Counting the primes in {}..{} and finding the {}{} ...",
                start,
                end,
                k,
                ordinal_suffix(k.get())
            ),
            None => info!("- Counting the primes in {}..{} ...", start, end),
        }

        metrics::record_segment();
        let mut count = 0u64;
        let mut target = Target::new(nth);

        // 2 в окне не представлена — обрабатываем отдельно
        if start < 3 {
            if start <= 2 && 2 < end {
                count += 1;
                target.observe(2);
            }
            start = 3;
        }

        start |= 1;
        if start >= end {
            return SegmentCount { count, located: target.located };
        }

        let mut window = PrimalityWindow::new(start, end);

        let crossing = self.crossing.crossing();
        debug!(
            "\tUsing {} primes ({}..{}) for crossing off",
            self.crossing.len(),
            self.crossing.first().unwrap_or(0),
            self.crossing.last().unwrap_or(0)
        );

        let mut marks = 0u64;
        for &p in crossing {
            let p = p as u64;
            let square = p * p;
            if square >= end {
                // таблица возрастает: дальше квадраты только больше
                break;
            }
            let first = first_odd_multiple(start, p).max(square);
            if first >= end {
                continue;
            }
            marks += window.cross_off(first, p);
        }
        metrics::record_composites_crossed(marks);

        let before = count;
        for prime in window.survivors() {
            count += 1;
            target.observe(prime);
        }
        metrics::record_primes_counted(count - before);

        info!("\t{} primes found", count);
        SegmentCount { count, located: target.located }
    }
}

/// Smallest odd multiple of `p` (odd) that is `>= start`; saturates at u64::MAX.
#[inline]
fn first_odd_multiple(start: u64, p: u64) -> u64 {
    let m = start.saturating_add((p - start % p) % p);
    if m % 2 == 0 {
        m.saturating_add(p)
    } else {
        m
    }
}

/// Self-contained variant: builds the crossing table for `range.end` itself.
pub fn count_primes(range: Range<u64>, nth: Option<NonZeroU64>) -> Result<SegmentCount> {
    let table = PrimeTable::for_range_end(range.end)?;
    Ok(SegmentedCounter::new(&table).count(range, nth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u64) -> Option<NonZeroU64> {
        NonZeroU64::new(n)
    }

    #[test]
    fn first_odd_multiple_cases() {
        assert_eq!(first_odd_multiple(3, 3), 3);
        assert_eq!(first_odd_multiple(4, 3), 9);
        assert_eq!(first_odd_multiple(10, 3), 15);
        assert_eq!(first_odd_multiple(15, 5), 15);
        assert_eq!(first_odd_multiple(101, 7), 105);
    }

    #[test]
    fn counts_match_pi() {
        // π(x): число простых < x
        for (x, pi) in [(25u64, 9u64), (100, 25), (10_000, 1229), (100_000, 9592)] {
            let got = count_primes(2..x, None).unwrap();
            assert_eq!(got.count, pi, "x={x}");
            assert_eq!(got.located, None);
        }
    }

    #[test]
    fn two_is_counted_only_when_inside() {
        assert_eq!(count_primes(0..2, None).unwrap().count, 0);
        assert_eq!(count_primes(2..2, None).unwrap().count, 0);
        assert_eq!(count_primes(2..3, None).unwrap().count, 1);
        assert_eq!(count_primes(0..3, None).unwrap().count, 1);
        assert_eq!(count_primes(3..3, None).unwrap().count, 0);
        assert_eq!(count_primes(3..4, None).unwrap().count, 1);
    }

    #[test]
    fn locates_two_and_beyond() {
        let r = count_primes(2..12, nz(1)).unwrap();
        assert_eq!(r, SegmentCount { count: 5, located: Some(2) });

        let r = count_primes(2..12, nz(5)).unwrap();
        assert_eq!(r.located, Some(11));

        // окно с нечётным началом, без двойки
        let r = count_primes(100..200, nz(3)).unwrap();
        assert_eq!(r.count, 21);
        assert_eq!(r.located, Some(107)); // 101, 103, 107
    }

    #[test]
    fn too_few_primes_leaves_located_unset() {
        // [24, 29) has no primes at all; [2, 12) has 5
        assert_eq!(count_primes(24..29, nz(1)).unwrap().located, None);
        let r = count_primes(2..12, nz(6)).unwrap();
        assert_eq!(r.count, 5);
        assert_eq!(r.located, None);
    }

    #[test]
    fn even_and_square_edges() {
        // 121 = 11^2 must not survive, 127 must
        let r = count_primes(120..128, None).unwrap();
        assert_eq!(r.count, 1);
        let r = count_primes(121..122, None).unwrap();
        assert_eq!(r.count, 0);
    }

    #[test]
    fn shared_table_serves_smaller_windows() {
        let table = PrimeTable::for_range_end(100_000).unwrap();
        let counter = SegmentedCounter::new(&table);
        assert_eq!(counter.count(2..100, None).count, 25);
        assert_eq!(counter.count(99_000..100_000, None).count, 9592 - 9505);
    }

    #[test]
    fn large_offset_window() {
        // простые в [10^12, 10^12 + 100): 1000000000039, 1000000000061, 1000000000063, 1000000000091
        let start = 1_000_000_000_000u64;
        let r = count_primes(start..start + 100, nz(2)).unwrap();
        assert_eq!(r.count, 4);
        assert_eq!(r.located, Some(1_000_000_000_061));
    }
}
