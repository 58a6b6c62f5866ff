//! User and profile generation.

use std::collections::HashSet;

use esports::Profile;
use rand::Rng;
use time::Date;
use uuid::Uuid;

use super::{next_id, unique_value, years_before};
use crate::sources::FakeSource;

/// Generated user data ready for database insertion.
///
/// The registration date is left to the database default.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Probability that a user is active.
    pub active_rate: f64,
    /// Probability that a profile has a birth date.
    pub birth_date_fill_rate: f64,
    /// Words in a profile biography.
    pub biography_words: usize,
    /// Youngest age, in years, of a user with a birth date.
    pub min_age: i32,
    /// Oldest age, in years, of a user with a birth date.
    pub max_age: i32,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            active_rate: 0.9,
            birth_date_fill_rate: 0.9,
            biography_words: 12,
            min_age: 16,
            max_age: 40,
        }
    }
}

/// Generates users, each with exactly one profile.
///
/// Emails are unique across everything this generator has produced.
pub struct UserGenerator {
    config: UserGenConfig,
    used_emails: HashSet<String>,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(UserGenConfig::default())
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self {
            config,
            used_emails: HashSet::new(),
        }
    }

    /// Generates a single user and its profile.
    pub fn generate(
        &mut self,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> (GeneratedUser, Profile) {
        let id = next_id(rng);
        let name = faker.full_name(rng);
        let email = unique_value(&mut self.used_emails, || faker.email(rng), suffix_email);
        let is_active = rng.gen_bool(self.config.active_rate);

        let user = GeneratedUser {
            id,
            name,
            email,
            is_active,
        };
        let profile = self.generate_profile(id, faker, today, rng);

        (user, profile)
    }

    /// Generates multiple users and their profiles, in matching order.
    pub fn generate_batch(
        &mut self,
        count: usize,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> (Vec<GeneratedUser>, Vec<Profile>) {
        (0..count).map(|_| self.generate(faker, today, rng)).unzip()
    }

    fn generate_profile(
        &self,
        user_id: Uuid,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> Profile {
        let biography = faker.sentence(self.config.biography_words, rng);
        let country = faker.country(rng);
        let birth_date = if rng.gen_bool(self.config.birth_date_fill_rate) {
            let earliest = years_before(today, self.config.max_age);
            let latest = years_before(today, self.config.min_age);
            Some(faker.date_between(earliest, latest, rng))
        } else {
            None
        };

        Profile {
            id: next_id(rng),
            user_id,
            biography,
            country,
            birth_date,
            avatar: None,
        }
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Puts the suffix in the local part: `ana@mail.com` becomes `ana2@mail.com`.
fn suffix_email(email: &str, n: usize) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{local}{n}@{domain}"),
        None => format!("{email}{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SequentialFaker;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::Month;

    /// Always hands out the same email to force collisions.
    struct SameEmailFaker(SequentialFaker);

    impl FakeSource for SameEmailFaker {
        fn full_name<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.full_name(rng)
        }
        fn email<R: Rng>(&mut self, _rng: &mut R) -> String {
            "taken@example.com".to_string()
        }
        fn username<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.username(rng)
        }
        fn word<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.word(rng)
        }
        fn sentence<R: Rng>(&mut self, words: usize, rng: &mut R) -> String {
            self.0.sentence(words, rng)
        }
        fn country<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.country(rng)
        }
        fn city<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.city(rng)
        }
        fn company<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.company(rng)
        }
        fn industry<R: Rng>(&mut self, rng: &mut R) -> String {
            self.0.industry(rng)
        }
    }

    fn today() -> Date {
        Date::from_calendar_date(2025, Month::June, 15).unwrap()
    }

    #[test]
    fn test_generate_user() {
        let mut user_gen = UserGenerator::new();
        let mut rng = StdRng::seed_from_u64(0);
        let (user, profile) = user_gen.generate(&mut SequentialFaker::new(), today(), &mut rng);

        assert!(!user.name.is_empty());
        assert!(user.email.contains('@'));
        assert_eq!(profile.user_id, user.id);
        assert!(!profile.biography.is_empty());
        assert!(!profile.country.is_empty());
        assert!(profile.avatar.is_none());
    }

    #[test]
    fn test_generate_batch() {
        let mut user_gen = UserGenerator::new();
        let mut rng = StdRng::seed_from_u64(0);
        let (users, profiles) =
            user_gen.generate_batch(50, &mut SequentialFaker::new(), today(), &mut rng);

        assert_eq!(users.len(), 50);
        assert_eq!(profiles.len(), 50);

        let ids: HashSet<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), 50);

        for (user, profile) in users.iter().zip(&profiles) {
            assert_eq!(profile.user_id, user.id);
        }
    }

    #[test]
    fn test_emails_unique_even_when_source_repeats() {
        let mut user_gen = UserGenerator::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut faker = SameEmailFaker(SequentialFaker::new());
        let (users, _) = user_gen.generate_batch(5, &mut faker, today(), &mut rng);

        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), 5);
        assert!(emails.contains("taken@example.com"));
        assert!(emails.contains("taken2@example.com"));
    }

    #[test]
    fn test_birth_dates_optional_and_in_age_range() {
        let mut user_gen = UserGenerator::new();
        let mut rng = StdRng::seed_from_u64(11);
        let (_, profiles) =
            user_gen.generate_batch(400, &mut SequentialFaker::new(), today(), &mut rng);

        let missing = profiles.iter().filter(|p| p.birth_date.is_none()).count();
        // ~10% expected
        assert!(missing > 10 && missing < 80, "missing birth dates: {missing}");

        let earliest = years_before(today(), 40);
        let latest = years_before(today(), 16);
        for date in profiles.iter().filter_map(|p| p.birth_date) {
            assert!(date >= earliest && date <= latest);
        }
    }

    #[test]
    fn test_mostly_active() {
        let mut user_gen = UserGenerator::new();
        let mut rng = StdRng::seed_from_u64(5);
        let (users, _) =
            user_gen.generate_batch(400, &mut SequentialFaker::new(), today(), &mut rng);

        let active = users.iter().filter(|u| u.is_active).count();
        assert!(active > 320 && active < 390, "active users: {active}");
    }

    #[test]
    fn test_custom_config() {
        let mut user_gen = UserGenerator::with_config(UserGenConfig {
            active_rate: 1.0,
            birth_date_fill_rate: 0.0,
            biography_words: 3,
            ..UserGenConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(8);
        let (users, profiles) =
            user_gen.generate_batch(30, &mut SequentialFaker::new(), today(), &mut rng);

        assert!(users.iter().all(|u| u.is_active));
        assert!(profiles.iter().all(|p| p.birth_date.is_none()));
        assert!(profiles.iter().all(|p| p.biography.split(' ').count() == 3));
    }

    #[test]
    fn test_suffix_email() {
        assert_eq!(suffix_email("ana@mail.com", 2), "ana2@mail.com");
        assert_eq!(suffix_email("broken", 3), "broken3");
    }
}
