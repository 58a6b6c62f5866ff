//! Team and sponsor contract generation.

use std::collections::HashSet;

use esports::{Contract, Sponsor, Team};
use rand::Rng;
use rand::seq::SliceRandom;
use time::Date;

use super::{cents, date_window, next_id, suffix_plain, unique_value, years_before};
use crate::sources::FakeSource;

/// How far back founding dates go.
const FOUNDING_WINDOW_YEARS: i32 = 10;

/// Team budget bounds, in cents.
const BUDGET_CENTS: (i64, i64) = (500_000, 20_000_000);

/// Most sponsors a single team signs.
const MAX_SPONSORS_PER_TEAM: usize = 3;

/// Contract start is at most this many days ago.
const CONTRACT_MAX_DAYS_AGO: i64 = 1000;

/// Contracts run for 1 to this many days.
const CONTRACT_MAX_LENGTH_DAYS: i64 = 365;

/// Contract amount bounds, in cents.
const CONTRACT_AMOUNT_CENTS: (i64, i64) = (50_000, 5_000_000);

/// Generates teams and their sponsor contracts.
pub struct TeamGenerator {
    used_names: HashSet<String>,
}

impl TeamGenerator {
    /// Creates a new team generator.
    pub fn new() -> Self {
        Self {
            used_names: HashSet::new(),
        }
    }

    /// Generates a batch of teams with unique names.
    pub fn generate_teams(
        &mut self,
        count: usize,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<Team> {
        (0..count)
            .map(|_| self.generate_single_team(faker, today, rng))
            .collect()
    }

    fn generate_single_team(
        &mut self,
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> Team {
        let name = unique_value(&mut self.used_names, || faker.company(rng), suffix_plain);
        let founded_on =
            faker.date_between(years_before(today, FOUNDING_WINDOW_YEARS), today, rng);
        let country = faker.country(rng);
        let (min, max) = BUDGET_CENTS;

        Team {
            id: next_id(rng),
            name,
            founded_on,
            country,
            budget: cents(rng, min, max),
        }
    }

    /// Signs each team with 1 to 3 distinct sponsors.
    ///
    /// Sponsors are sampled without replacement per team, so a team never
    /// holds two contracts with the same sponsor. Teams get no contracts when
    /// there are no sponsors.
    pub fn generate_contracts(
        &self,
        teams: &[Team],
        sponsors: &[Sponsor],
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<Contract> {
        if sponsors.is_empty() {
            return Vec::new();
        }

        let mut contracts = Vec::new();
        let max_sponsors = MAX_SPONSORS_PER_TEAM.min(sponsors.len());

        for team in teams {
            let count = rng.gen_range(1..=max_sponsors);
            let chosen: Vec<&Sponsor> = sponsors.choose_multiple(rng, count).collect();

            for sponsor in chosen {
                let (starts_on, ends_on) =
                    date_window(today, CONTRACT_MAX_DAYS_AGO, CONTRACT_MAX_LENGTH_DAYS, rng);
                let (min, max) = CONTRACT_AMOUNT_CENTS;

                contracts.push(Contract {
                    id: next_id(rng),
                    team_id: team.id,
                    sponsor_id: sponsor.id,
                    starts_on,
                    ends_on,
                    amount: cents(rng, min, max),
                });
            }
        }

        contracts
    }
}

impl Default for TeamGenerator {
    fn default() -> Self {
        Self::new()
    }
}
