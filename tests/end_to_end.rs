use anyhow::Result;

use nth_prime::{find_nth_prime, SearchBuilder, SearchConfig, SearchError};

/// Независимый эталон: простые < limit обычным решетом.
fn reference_primes(limit: usize) -> Vec<u64> {
    let mut composite = vec![false; limit];
    let mut out = Vec::new();
    for i in 2..limit {
        if composite[i] {
            continue;
        }
        out.push(i as u64);
        let mut j = i * i;
        while j < limit {
            composite[j] = true;
            j += i;
        }
    }
    out
}

fn is_prime_trial(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[test]
fn known_scenarios() -> Result<()> {
    let cfg = SearchConfig::default();
    for (n, p) in [(1u64, 2u64), (2, 3), (6, 13), (1000, 7919), (100_000, 1_299_709)] {
        let got = find_nth_prime(n, &cfg)?;
        assert_eq!(got.value, p, "n={n}");
        assert!(is_prime_trial(got.value));
        assert!(got.primes_examined >= n);
    }
    Ok(())
}

#[test]
fn matches_reference_across_threshold_regions() -> Result<()> {
    let primes = reference_primes(800_000);
    let cfg = SearchConfig::default();

    // все малые + точки вокруг переключения формул оценок
    let mut sample: Vec<u64> = (1..=300).collect();
    sample.extend([
        6_076, 6_077, 6_078, 7_021, 7_022, 8_581, 8_601, 8_602, 8_603, 30_391, 30_392, 30_393,
        40_000, 63_951,
    ]);

    for n in sample {
        let got = find_nth_prime(n, &cfg)?;
        assert_eq!(got.value, primes[n as usize - 1], "n={n}");
    }
    Ok(())
}

#[test]
fn parallel_and_sequential_agree() -> Result<()> {
    let seq = SearchConfig::default();
    let par = SearchBuilder::new().parallel(true).threads(3).build();
    let par_default_pool = SearchBuilder::new().parallel(true).build();

    for n in [1u64, 5, 97, 1_000, 25_000, 100_000] {
        let a = find_nth_prime(n, &seq)?;
        let b = find_nth_prime(n, &par)?;
        let c = find_nth_prime(n, &par_default_pool)?;
        assert_eq!(a, b, "n={n}");
        assert_eq!(a, c, "n={n}");
    }
    Ok(())
}

#[test]
fn piece_count_does_not_change_answer() -> Result<()> {
    for pieces in [1u64, 2, 3, 7, 10, 64, 1_000] {
        let cfg = SearchConfig::default().with_pieces(pieces);
        let got = find_nth_prime(10_000, &cfg)?;
        assert_eq!(got.value, 104_729, "pieces={pieces}");
        assert!(got.pieces as u64 <= pieces);
    }
    Ok(())
}

#[test]
fn zero_and_out_of_domain_are_usage_errors() {
    let cfg = SearchConfig::default();

    let e = find_nth_prime(0, &cfg).unwrap_err();
    assert_eq!(e, SearchError::ZeroOrdinal);
    assert!(!e.is_internal());

    let e = find_nth_prime(u64::MAX, &cfg).unwrap_err();
    assert_eq!(e, SearchError::OrdinalTooLarge { n: u64::MAX });
    assert!(!e.is_internal());
}
