use anyhow::Result;

use nth_prime::{find_nth_prime, metrics, SearchConfig};

// Один тест: счётчики глобальные, параллельные тесты в одном бинаре мешали бы друг другу.
#[test]
fn reset_then_search_advances_counters() -> Result<()> {
    metrics::reset();
    let m = metrics::snapshot();
    assert_eq!(m.segments_counted, 0);
    assert_eq!(m.windows_allocated, 0);
    assert_eq!(m.avg_window_slots(), 0.0);
    assert_eq!(m.survivor_ratio(), 0.0);

    let got = find_nth_prime(1_000, &SearchConfig::default())?;
    assert_eq!(got.value, 7_919);

    let m = metrics::snapshot();
    assert_eq!(m.searches_total, 1);
    assert_eq!(m.targets_located, 1);
    assert_eq!(m.crossing_tables_built, 1);
    assert_eq!(m.crossing_primes_generated, got.crossing_primes as u64);
    // 10 кусков + финальное окно
    assert_eq!(m.segments_counted, got.pieces as u64 + 1);
    // + окно базового решета
    assert_eq!(m.windows_allocated, m.segments_counted + 1);
    assert!(m.composites_crossed > 0);
    // двойка считается вне окна
    assert_eq!(m.primes_counted, got.primes_examined - 1);

    let ratio = m.survivor_ratio();
    assert!(ratio > 0.0 && ratio <= 1.0, "ratio={ratio}");
    Ok(())
}
