use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::error;

use crate::config::{SearchConfig, DEFAULT_PIECES};
use crate::error::SearchError;
use crate::metrics::{self, MetricsSnapshot};
use crate::search::{find_nth_prime, NthPrime};

/// Exit code for usage errors (wrong argument count, bad ordinal).
pub const EXIT_USAGE: i32 = 1;
/// Exit code for internal invariant violations (EX_SOFTWARE).
pub const EXIT_INTERNAL: i32 = 70;

/// Find the Nth prime (p(1) = 2) with a segmented Sieve of Eratosthenes.
#[derive(Parser, Debug)]
#[command(name = "nth-prime", version, about = "Exact Nth prime via bounds + segmented sieve")]
pub struct Cli {
    /// Ordinal N of the prime to find
    pub nth: u64,

    /// Pieces for the counting pass below the lower bound (bounds peak memory)
    #[arg(long, default_value_t = DEFAULT_PIECES)]
    pub pieces: u64,

    /// Count the pieces concurrently
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Worker threads for --parallel (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Print one JSON object instead of text lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Also print the metrics snapshot
    #[arg(long, default_value_t = false)]
    pub stats: bool,
}

impl Cli {
    pub fn config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_pieces(self.pieces)
            .with_parallel(self.parallel)
            .with_threads(self.threads)
            .build()
    }
}

/// Parse process arguments, run the search, return the process exit code.
pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage(e),
    };

    match exec(&cli) {
        Ok(()) => 0,
        Err(e) => match e.downcast_ref::<SearchError>() {
            Some(se) if se.is_internal() => {
                // дефект оценок/решета — частичный результат не выдаём
                error!("{:#}", e);
                EXIT_INTERNAL
            }
            Some(_) => {
                println!("error: {:#}", e);
                println!("{}", Cli::command().render_usage());
                EXIT_USAGE
            }
            None => {
                error!("{:?}", e);
                EXIT_USAGE
            }
        },
    }
}

/// clap-ошибка разбора: usage в stdout и код 1 (help/version — код 0).
fn usage(e: clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{}", e);
            0
        }
        _ => {
            print!("{}", e);
            EXIT_USAGE
        }
    }
}

pub fn exec(cli: &Cli) -> Result<()> {
    let cfg = cli.config();
    let found = find_nth_prime(cli.nth, &cfg)
        .with_context(|| format!("search for prime #{}", cli.nth))?;

    if cli.json {
        let stats = cli.stats.then(metrics::snapshot);
        println!("{}", render_json(&found, stats.as_ref())?);
        return Ok(());
    }

    println!("Prime #{} = {}", found.ordinal, found.value);
    println!("\t({} primes calculated)", found.primes_examined);
    if cli.stats {
        print_stats(&metrics::snapshot());
    }
    Ok(())
}

pub fn render_json(found: &NthPrime, stats: Option<&MetricsSnapshot>) -> Result<String> {
    let v = serde_json::json!({
        "result": found,
        "metrics": stats,
    });
    Ok(serde_json::to_string(&v)?)
}

fn print_stats(ms: &MetricsSnapshot) {
    println!("Metrics snapshot:");
    println!("  crossing_tables_built     = {}", ms.crossing_tables_built);
    println!("  crossing_primes_generated = {}", ms.crossing_primes_generated);
    println!("  segments_counted          = {}", ms.segments_counted);
    println!("  windows_allocated         = {}", ms.windows_allocated);
    println!("  window_slots_allocated    = {}", ms.window_slots_allocated);
    println!("  avg_window_slots          = {:.1}", ms.avg_window_slots());
    println!("  composites_crossed        = {}", ms.composites_crossed);
    println!("  primes_counted            = {}", ms.primes_counted);
    println!("  survivor_ratio            = {:.4}", ms.survivor_ratio());
    println!("  searches_total            = {}", ms.searches_total);
    println!("  targets_located           = {}", ms.targets_located);
}
