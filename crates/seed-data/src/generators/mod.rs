//! Entity generators for seed data.
//!
//! Each generator builds rows for one part of the schema and only needs the
//! rows it references, so they can run in dependency order:
//! - [`UserGenerator`]: Users and their profiles
//! - [`GameGenerator`]: Games with a genre and developer
//! - [`SponsorGenerator`]: Sponsors with an annual budget
//! - [`TeamGenerator`]: Teams and their sponsor contracts
//! - [`PlayerGenerator`]: Players bound to distinct users, and their stats
//! - [`TournamentGenerator`]: Tournaments and ranked participations

pub mod game;
pub mod player;
pub mod sponsor;
pub mod team;
pub mod tournament;
pub mod user;

use std::collections::HashSet;

use rand::Rng;
use rust_decimal::Decimal;
use time::{Date, Duration};
use uuid::Uuid;

pub use game::{GameGenerator, Genre};
pub use player::{PlayerGenConfig, PlayerGenerator, Role};
pub use sponsor::SponsorGenerator;
pub use team::TeamGenerator;
pub use tournament::TournamentGenerator;
pub use user::{GeneratedUser, UserGenConfig, UserGenerator};

/// Attempts at drawing a fresh value before falling back to a numeric suffix.
const UNIQUE_ATTEMPTS: usize = 20;

/// Draws a UUID from the caller's RNG so seeded runs produce identical keys.
pub(crate) fn next_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

/// Draws values from `candidate` until one is not in `used`.
///
/// After [`UNIQUE_ATTEMPTS`] collisions the last candidate is disambiguated
/// with `with_suffix(candidate, n)` for increasing `n`.
pub(crate) fn unique_value(
    used: &mut HashSet<String>,
    mut candidate: impl FnMut() -> String,
    with_suffix: impl Fn(&str, usize) -> String,
) -> String {
    let mut last = String::new();
    for _ in 0..UNIQUE_ATTEMPTS {
        last = candidate();
        if used.insert(last.clone()) {
            return last;
        }
    }

    let mut n = 2;
    loop {
        let value = with_suffix(&last, n);
        if used.insert(value.clone()) {
            return value;
        }
        n += 1;
    }
}

/// Appends `n` to a plain value: `"Vortex"` becomes `"Vortex 2"`.
pub(crate) fn suffix_plain(value: &str, n: usize) -> String {
    format!("{value} {n}")
}

/// A whole-cent amount drawn uniformly from `min..=max` (both in cents).
pub(crate) fn cents(rng: &mut impl Rng, min: i64, max: i64) -> Decimal {
    Decimal::new(rng.gen_range(min..=max), 2)
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A start date up to `max_days_ago` before `today` and an end date
/// `1..=max_length` days after it.
pub(crate) fn date_window(
    today: Date,
    max_days_ago: i64,
    max_length: i64,
    rng: &mut impl Rng,
) -> (Date, Date) {
    let start = today - Duration::days(rng.gen_range(0..=max_days_ago));
    let end = start + Duration::days(rng.gen_range(1..=max_length));
    (start, end)
}

/// The same calendar day `years` years earlier (Feb 29 falls back to 365-day years).
pub(crate) fn years_before(today: Date, years: i32) -> Date {
    today
        .replace_year(today.year() - years)
        .unwrap_or_else(|_| today - Duration::days(365 * i64::from(years)))
}

/// Upper-cases the first character.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
