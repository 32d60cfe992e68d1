// Базовые модули
pub mod error;
pub mod config;
pub mod metrics;
pub mod util;   // src/util/mod.rs

// Числовой конвейер: оценки → базовое решето → сегментный счётчик → оркестратор
pub mod bounds;
pub mod window;
pub mod sieve;
pub mod segment;
pub mod search;

// CLI (clap), используется бинарником nth-prime
pub mod cli;

// Удобные реэкспорты
pub use bounds::{prime_count_upper_bound, prime_lower_bound, prime_upper_bound, Bounds};
pub use config::{SearchBuilder, SearchConfig};
pub use error::SearchError;
pub use search::{find_nth_prime, partition, NthPrime};
pub use segment::{count_primes, SegmentCount, SegmentedCounter};
pub use sieve::PrimeTable;
