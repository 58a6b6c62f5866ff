//! Sources of fake values for the generators.
//!
//! Generators never call a fake-data library directly; they go through
//! [`FakeSource`] so tests can swap in a predictable stub:
//! - [`EnFaker`]: English-locale values from the `fake` crate
//! - [`SequentialFaker`]: Counter-based values, unique and fully predictable

mod en;
mod sequential;

use rand::Rng;
use time::{Date, Duration};

pub use en::EnFaker;
pub use sequential::SequentialFaker;

/// Produces the human-facing values of generated rows.
///
/// Every method receives the caller's RNG so a seeded run stays reproducible.
pub trait FakeSource {
    fn full_name<R: Rng>(&mut self, rng: &mut R) -> String;

    fn email<R: Rng>(&mut self, rng: &mut R) -> String;

    fn username<R: Rng>(&mut self, rng: &mut R) -> String;

    fn word<R: Rng>(&mut self, rng: &mut R) -> String;

    /// A sentence of exactly `words` words.
    fn sentence<R: Rng>(&mut self, words: usize, rng: &mut R) -> String;

    fn country<R: Rng>(&mut self, rng: &mut R) -> String;

    fn city<R: Rng>(&mut self, rng: &mut R) -> String;

    fn company<R: Rng>(&mut self, rng: &mut R) -> String;

    /// A short business phrase describing what a company does.
    fn industry<R: Rng>(&mut self, rng: &mut R) -> String;

    /// A date in `start..=end`. Returns `start` if the range is empty.
    fn date_between<R: Rng>(&mut self, start: Date, end: Date, rng: &mut R) -> Date {
        let span = (end - start).whole_days();
        if span <= 0 {
            return start;
        }
        start + Duration::days(rng.gen_range(0..=span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::Month;

    #[test]
    fn test_date_between_stays_in_range() {
        let mut faker = SequentialFaker::new();
        let mut rng = StdRng::seed_from_u64(7);
        let start = Date::from_calendar_date(2020, Month::January, 1).unwrap();
        let end = Date::from_calendar_date(2020, Month::March, 1).unwrap();

        for _ in 0..200 {
            let date = faker.date_between(start, end, &mut rng);
            assert!(date >= start && date <= end);
        }
    }

    #[test]
    fn test_date_between_empty_range() {
        let mut faker = SequentialFaker::new();
        let mut rng = StdRng::seed_from_u64(7);
        let start = Date::from_calendar_date(2020, Month::January, 1).unwrap();
        let end = Date::from_calendar_date(2019, Month::January, 1).unwrap();

        assert_eq!(faker.date_between(start, end, &mut rng), start);
    }
}
