//! Orchestrator: bounds → counting pass over `[2, lower)` → targeted search.
//!
//! 1) `lower <= p(n) < upper` from the analytic bounds;
//! 2) `[2, lower)` is split into `pieces` equal windows and counted without a
//!    target (pieces are independent and may run on a rayon pool);
//! 3) `[lower, upper)` is sieved once more to locate ordinal `n − counted`.
//!
//! One crossing table (for √upper) is built per search and shared read-only
//! by every window; each window owns its own flags buffer.

use std::num::NonZeroU64;
use std::ops::Range;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::bounds::Bounds;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::metrics;
use crate::segment::SegmentedCounter;
use crate::sieve::PrimeTable;

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NthPrime {
    /// Requested ordinal (p(1) = 2).
    pub ordinal: u64,
    /// The prime itself.
    pub value: u64,
    /// Primes counted below `lower` plus primes counted in `[lower, upper)`.
    pub primes_examined: u64,
    pub count_below_lower: u64,
    pub lower: u64,
    pub upper: u64,
    /// Size of the shared crossing table (2 included).
    pub crossing_primes: usize,
    /// Windows actually used for the counting pass.
    pub pieces: usize,
}

/// Find p(n).
pub fn find_nth_prime(n: u64, cfg: &SearchConfig) -> Result<NthPrime> {
    if n == 0 {
        return Err(SearchError::ZeroOrdinal);
    }
    metrics::record_search();

    let Range { start: lower, end: upper } = Bounds::for_ordinal(n).to_range(n)?;
    if !(2 <= lower && lower < upper) {
        return Err(SearchError::BoundsInverted { n, lower, upper });
    }
    info!("searching for prime #{} in {}..{} ({})", n, lower, upper, cfg);

    let crossing = PrimeTable::for_range_end(upper).map_err(|_| SearchError::OrdinalTooLarge { n })?;
    let counter = SegmentedCounter::new(&crossing);

    let pieces = partition(2..lower, cfg.effective_pieces());
    info!("+ Will break counting into {} pieces...", pieces.len());

    let count_below_lower: u64 = if cfg.parallel {
        count_pieces_parallel(counter, &pieces, cfg.threads)
    } else {
        pieces.iter().map(|r| counter.count(r.clone(), None).count).sum()
    };
    info!(
        "+ Counted {} noncandidate primes, now finishing up...",
        count_below_lower
    );

    // count_below_lower < n, иначе нижняя оценка соврала
    let target = n
        .checked_sub(count_below_lower)
        .and_then(NonZeroU64::new)
        .ok_or(SearchError::LowerBoundOvercount {
            n,
            lower,
            counted: count_below_lower,
        })?;

    let last = counter.count(lower..upper, Some(target));
    let value = last.located.ok_or(SearchError::NotLocated {
        n,
        lower,
        upper,
        target: target.get(),
    })?;
    metrics::record_target_located();

    Ok(NthPrime {
        ordinal: n,
        value,
        primes_examined: count_below_lower + last.count,
        count_below_lower,
        lower,
        upper,
        crossing_primes: crossing.len(),
        pieces: pieces.len(),
    })
}

/// Split `range` into at most `pieces` contiguous windows of equal width
/// (width rounded up, the last one may be shorter). Empty range → no windows.
pub fn partition(range: Range<u64>, pieces: u64) -> Vec<Range<u64>> {
    let len = range.end.saturating_sub(range.start);
    if len == 0 {
        return Vec::new();
    }
    let pieces = pieces.max(1);
    let step = len / pieces + u64::from(len % pieces != 0);

    let mut out = Vec::with_capacity(pieces.min(len) as usize);
    let mut from = range.start;
    while from < range.end {
        let to = from.saturating_add(step).min(range.end);
        out.push(from..to);
        from = to;
    }
    out
}

/// Count every window on a rayon pool and merge by summation.
fn count_pieces_parallel(counter: SegmentedCounter<'_>, pieces: &[Range<u64>], threads: usize) -> u64 {
    let run = || {
        pieces
            .par_iter()
            .map(|r| counter.count(r.clone(), None).count)
            .sum::<u64>()
    };
    if threads == 0 {
        return run();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            warn!("rayon pool with {} threads unavailable ({}), using global pool", threads, e);
            run()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_shapes() {
        assert!(partition(2..2, 10).is_empty());
        assert!(partition(5..2, 10).is_empty());
        assert_eq!(partition(2..12, 10).len(), 10);
        assert_eq!(partition(2..5, 10), vec![2..3, 3..4, 4..5]);
        assert_eq!(partition(0..10, 3), vec![0..4, 4..8, 8..10]);
        assert_eq!(partition(0..10, 0), vec![0..10]);
    }

    #[test]
    fn partition_is_contiguous_and_covering() {
        for pieces in 1..20 {
            let parts = partition(2..1001, pieces);
            assert!(parts.len() as u64 <= pieces);
            assert_eq!(parts.first().unwrap().start, 2);
            assert_eq!(parts.last().unwrap().end, 1001);
            assert!(parts.windows(2).all(|w| w[0].end == w[1].start));
        }
    }

    #[test]
    fn zero_ordinal_is_usage_error() {
        let err = find_nth_prime(0, &SearchConfig::default()).unwrap_err();
        assert_eq!(err, SearchError::ZeroOrdinal);
        assert!(!err.is_internal());
    }

    #[test]
    fn first_primes() {
        let cfg = SearchConfig::default();
        let expect = [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
        for (i, &p) in expect.iter().enumerate() {
            let got = find_nth_prime(i as u64 + 1, &cfg).unwrap();
            assert_eq!(got.value, p, "n={}", i + 1);
            assert!(got.primes_examined >= got.ordinal);
        }
    }

    #[test]
    fn report_fields_are_consistent() {
        let got = find_nth_prime(1000, &SearchConfig::default()).unwrap();
        assert_eq!(got.value, 7919);
        assert!(got.lower <= 7919 && 7919 < got.upper);
        assert!(got.count_below_lower < 1000);
        assert!(got.primes_examined >= 1000);
        assert_eq!(got.pieces, 10);
        assert!(got.crossing_primes > 0);
    }
}
