//! util — мелкие общие хелперы.
//!
//! Содержит:
//! - isqrt(): целочисленный корень для всего диапазона u64.
//! - ordinal_suffix(): "st"/"nd"/"rd"/"th" для сообщений вида "finding the 3rd".

/// Integer square root, exact for every u64.
/// Seed from f64, then Newton-style correction with checked arithmetic.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// English ordinal suffix for `n` (1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...).
pub fn ordinal_suffix(n: u64) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
