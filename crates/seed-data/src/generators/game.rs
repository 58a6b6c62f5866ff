//! Game generation.

use std::collections::HashSet;

use esports::Game;
use rand::Rng;
use rand::seq::SliceRandom;
use time::Date;

use super::{capitalize, next_id, suffix_plain, unique_value, years_before};
use crate::sources::FakeSource;

/// Game genres stored in the `genre` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Moba,
    Fps,
    Rts,
    BattleRoyale,
    Sports,
    Rpg,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Moba,
        Genre::Fps,
        Genre::Rts,
        Genre::BattleRoyale,
        Genre::Sports,
        Genre::Rpg,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Moba => "MOBA",
            Genre::Fps => "FPS",
            Genre::Rts => "RTS",
            Genre::BattleRoyale => "Battle Royale",
            Genre::Sports => "Sports",
            Genre::Rpg => "RPG",
        }
    }
}

/// Draw pool for genres; shooters are twice as common.
const GENRE_POOL: &[Genre] = &[
    Genre::Moba,
    Genre::Fps,
    Genre::Fps,
    Genre::Rts,
    Genre::BattleRoyale,
    Genre::Sports,
    Genre::Rpg,
];

/// How far back release dates go.
const RELEASE_WINDOW_YEARS: i32 = 10;

/// Generates games with unique names.
pub struct GameGenerator {
    used_names: HashSet<String>,
}

impl GameGenerator {
    pub fn new() -> Self {
        Self {
            used_names: HashSet::new(),
        }
    }

    pub fn generate_batch(
        &mut self,
        count: usize,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<Game> {
        (0..count).map(|_| self.generate(faker, today, rng)).collect()
    }

    pub fn generate(
        &mut self,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> Game {
        let name = unique_value(
            &mut self.used_names,
            || {
                let first = capitalize(&faker.word(rng));
                let second = capitalize(&faker.word(rng));
                format!("{first} {second}")
            },
            suffix_plain,
        );
        let genre = GENRE_POOL.choose(rng).copied().unwrap_or(Genre::Moba);
        let developer = faker.company(rng);
        let released_on =
            faker.date_between(years_before(today, RELEASE_WINDOW_YEARS), today, rng);

        Game {
            id: next_id(rng),
            name,
            genre: genre.as_str().to_string(),
            developer,
            released_on,
        }
    }
}

impl Default for GameGenerator {
    fn default() -> Self {
        Self::new()
    }
}
