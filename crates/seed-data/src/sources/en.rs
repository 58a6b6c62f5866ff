use fake::Fake;
use fake::faker::address::en::{CityName, CountryName};
use fake::faker::company::en::{Bs, CompanyName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use rand::Rng;

use super::FakeSource;

/// Width of the country and nationality columns.
const MAX_COUNTRY_LEN: usize = 50;

/// Redraws before a too-long country name is cut to fit.
const COUNTRY_ATTEMPTS: usize = 10;

/// Realistic English-locale values backed by the `fake` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnFaker;

impl FakeSource for EnFaker {
    fn full_name<R: Rng>(&mut self, rng: &mut R) -> String {
        Name().fake_with_rng(rng)
    }

    fn email<R: Rng>(&mut self, rng: &mut R) -> String {
        SafeEmail().fake_with_rng(rng)
    }

    fn username<R: Rng>(&mut self, rng: &mut R) -> String {
        Username().fake_with_rng(rng)
    }

    fn word<R: Rng>(&mut self, rng: &mut R) -> String {
        Word().fake_with_rng(rng)
    }

    fn sentence<R: Rng>(&mut self, words: usize, rng: &mut R) -> String {
        Sentence(words..words + 1).fake_with_rng(rng)
    }

    /// A country name of at most [`MAX_COUNTRY_LEN`] characters.
    ///
    /// A few listed names are longer, e.g. "British Indian Ocean Territory
    /// (Chagos Archipelago)"; those are redrawn and cut as a last resort.
    fn country<R: Rng>(&mut self, rng: &mut R) -> String {
        let mut country: String = CountryName().fake_with_rng(rng);
        for _ in 0..COUNTRY_ATTEMPTS {
            if country.chars().count() <= MAX_COUNTRY_LEN {
                return country;
            }
            country = CountryName().fake_with_rng(rng);
        }
        country.chars().take(MAX_COUNTRY_LEN).collect()
    }

    fn city<R: Rng>(&mut self, rng: &mut R) -> String {
        CityName().fake_with_rng(rng)
    }

    fn company<R: Rng>(&mut self, rng: &mut R) -> String {
        CompanyName().fake_with_rng(rng)
    }

    fn industry<R: Rng>(&mut self, rng: &mut R) -> String {
        Bs().fake_with_rng(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_values_are_populated() {
        let mut faker = EnFaker;
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!faker.full_name(&mut rng).is_empty());
        assert!(faker.email(&mut rng).contains('@'));
        assert!(!faker.country(&mut rng).is_empty());
        assert!(!faker.company(&mut rng).is_empty());
        assert!(!faker.industry(&mut rng).is_empty());
    }

    #[test]
    fn test_country_fits_column() {
        let mut faker = EnFaker;
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..5_000 {
            let country = faker.country(&mut rng);
            assert!(
                country.chars().count() <= MAX_COUNTRY_LEN,
                "{country} is too long"
            );
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        assert_eq!(EnFaker.full_name(&mut a), EnFaker.full_name(&mut b));
        assert_eq!(EnFaker.email(&mut a), EnFaker.email(&mut b));
        assert_eq!(EnFaker.city(&mut a), EnFaker.city(&mut b));
    }
}
