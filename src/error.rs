//! Ошибки поиска N-го простого.
//!
//! Two classes share one enum:
//! - usage errors (bad ordinal from the caller) — recoverable by fixing input;
//! - internal errors (analytic bounds or sieve disagree with reality) — fatal,
//!   a rerun reproduces them because the computation is deterministic.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("ordinal must be >= 1 (primes are numbered from 1: p(1) = 2)")]
    ZeroOrdinal,

    #[error("ordinal {n} is out of range: its upper bound does not fit the 64-bit search domain")]
    OrdinalTooLarge { n: u64 },

    #[error("range end {end} needs crossing primes beyond the 32-bit domain")]
    RangeTooLarge { end: u64 },

    #[error("internal: bounds for n={n} are not a valid range ({lower}..{upper})")]
    BoundsInverted { n: u64, lower: u64, upper: u64 },

    #[error("internal: counted {counted} primes below lower bound {lower}, expected fewer than {n}")]
    LowerBoundOvercount { n: u64, lower: u64, counted: u64 },

    #[error("internal: prime #{n} not found in {lower}..{upper} (needed ordinal {target} inside the window)")]
    NotLocated {
        n: u64,
        lower: u64,
        upper: u64,
        target: u64,
    },
}

impl SearchError {
    /// true для нарушений инвариантов (дефект оценок/решета), false для ошибок ввода.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SearchError::BoundsInverted { .. }
                | SearchError::LowerBoundOvercount { .. }
                | SearchError::NotLocated { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
