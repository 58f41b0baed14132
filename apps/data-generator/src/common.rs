use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use std::ops::Range;

/// Generate value from predefined options using provided RNG
pub fn generate_from_options_with_rng<'a, R: Rng + ?Sized>(
    options: &[&'a str],
    rng: &mut R,
) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

/// Weighted categorical draw over (value, weight) pairs using provided RNG.
/// Weights need not sum to 1; the draw is proportional to each weight.
pub fn generate_weighted_with_rng<T: Copy, R: Rng + ?Sized>(
    options: &[(T, f64)],
    rng: &mut R,
) -> T {
    let total: f64 = options.iter().map(|(_, weight)| *weight).sum();
    let mut target = rng.gen::<f64>() * total;
    for (value, weight) in options {
        target -= weight;
        if target < 0.0 {
            return *value;
        }
    }
    // Floating-point roundoff can leave target at exactly 0.0
    options[options.len() - 1].0
}

/// Generate ID with prefix and zero-padded numeric component drawn from `pool`
pub fn generate_prefixed_id_with_rng<R: Rng + ?Sized>(
    prefix: &str,
    width: usize,
    pool: Range<u32>,
    rng: &mut R,
) -> String {
    format!("{}{:0width$}", prefix, rng.gen_range(pool), width = width)
}

/// Uniformly draw a date in the closed range [start, end] using provided RNG
pub fn generate_date_between_with_rng<R: Rng + ?Sized>(
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> NaiveDate {
    let span_days = (end - start).num_days();
    start + Duration::days(rng.gen_range(0..=span_days))
}

/// Whole calendar months elapsed from `from` to `to` (0 when `to` precedes `from`)
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0)
}
