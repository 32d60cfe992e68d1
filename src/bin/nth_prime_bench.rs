use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use serde::Serialize;
use std::time::{Duration, Instant};

use nth_prime::{find_nth_prime, metrics, SearchConfig};

/// Nth-prime micro-benchmark CLI
///
/// Примеры:
///   nth-prime-bench
///   nth-prime-bench --n 1000000 --n 5000000 --parallel --repeat 3 --json
#[derive(Parser, Debug)]
#[command(name = "nth-prime-bench", version, about = "Nth-prime micro-bench CLI")]
struct Opt {
    /// Ordinals to time (repeatable); default ladder 10^1..10^6
    #[arg(long = "n")]
    ordinals: Vec<u64>,

    /// Pieces for the counting pass
    #[arg(long, default_value_t = nth_prime::config::DEFAULT_PIECES)]
    pieces: u64,

    /// Count pieces on a rayon pool
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Worker threads for --parallel (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Runs per ordinal (best time is reported)
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Emit one JSON object with all rows
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Row {
    ordinal: u64,
    value: u64,
    primes_examined: u64,
    best_secs: f64,
    primes_per_sec: f64,
    window_slots: u64,
}

fn main() {
    // бенч по умолчанию молчит: прогресс сегментов только через RUST_LOG
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opt = Opt::parse();
    let cfg = SearchConfig::default()
        .with_pieces(opt.pieces)
        .with_parallel(opt.parallel)
        .with_threads(opt.threads)
        .build();

    let ordinals = if opt.ordinals.is_empty() {
        (1..=6).map(|e| 10u64.pow(e)).collect()
    } else {
        opt.ordinals.clone()
    };

    if !opt.json {
        println!("{}", cfg);
    }

    let mut rows = Vec::with_capacity(ordinals.len());
    for &n in &ordinals {
        let mut best = Duration::MAX;
        let mut last = None;
        metrics::reset();
        for _ in 0..opt.repeat.max(1) {
            let t0 = Instant::now();
            let found = find_nth_prime(n, &cfg).with_context(|| format!("bench n={}", n))?;
            best = best.min(t0.elapsed());
            last = Some(found);
        }
        let Some(found) = last else { continue };
        let secs = best.as_secs_f64();
        let row = Row {
            ordinal: n,
            value: found.value,
            primes_examined: found.primes_examined,
            best_secs: secs,
            primes_per_sec: if secs > 0.0 { found.primes_examined as f64 / secs } else { 0.0 },
            window_slots: metrics::snapshot().window_slots_allocated / u64::from(opt.repeat.max(1)),
        };
        if !opt.json {
            println!(
                "[{:>12}] p = {:<14} examined={:<12} best={:.4}s, tput={:.0} primes/s",
                row.ordinal, row.value, row.primes_examined, row.best_secs, row.primes_per_sec
            );
        }
        rows.push(row);
    }

    if opt.json {
        let v = serde_json::json!({
            "config": {
                "pieces": cfg.effective_pieces(),
                "parallel": cfg.parallel,
                "threads": cfg.threads,
            },
            "rows": rows,
        });
        println!("{}", serde_json::to_string(&v)?);
    }
    Ok(())
}
