//! Builds a relationally consistent dataset in memory.

use std::time::Instant;

use esports::{
    Contract, Game, Participation, Player, PlayerStats, Profile, Sponsor, Team, Tournament,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::debug;

use crate::config::SeedConfig;
use crate::generators::{
    GameGenerator, GeneratedUser, PlayerGenerator, SponsorGenerator, TeamGenerator,
    TournamentGenerator, UserGenerator,
};
use crate::sources::FakeSource;

/// Users are never fewer than this, whatever the scale.
const MIN_USERS: usize = 20;

/// Every row of one seeding run, grouped per table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub users: Vec<GeneratedUser>,
    pub profiles: Vec<Profile>,
    pub games: Vec<Game>,
    pub sponsors: Vec<Sponsor>,
    pub teams: Vec<Team>,
    pub contracts: Vec<Contract>,
    pub players: Vec<Player>,
    pub stats: Vec<PlayerStats>,
    pub tournaments: Vec<Tournament>,
    pub participations: Vec<Participation>,
}

impl Dataset {
    /// Row counts of this dataset.
    pub fn report(&self) -> SeedReport {
        SeedReport {
            users: self.users.len(),
            profiles: self.profiles.len(),
            games: self.games.len(),
            sponsors: self.sponsors.len(),
            teams: self.teams.len(),
            contracts: self.contracts.len(),
            players: self.players.len(),
            stats: self.stats.len(),
            tournaments: self.tournaments.len(),
            participations: self.participations.len(),
        }
    }
}

/// Per-entity row counts of a seeding run.
///
/// A failed run reports [`SeedReport::default`], since nothing was committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub users: usize,
    pub profiles: usize,
    pub games: usize,
    pub sponsors: usize,
    pub teams: usize,
    pub contracts: usize,
    pub players: usize,
    pub stats: usize,
    pub tournaments: usize,
    pub participations: usize,
}

impl SeedReport {
    /// Labelled counts in insertion order.
    pub fn entries(&self) -> [(&'static str, usize); 10] {
        [
            ("users", self.users),
            ("profiles", self.profiles),
            ("games", self.games),
            ("sponsors", self.sponsors),
            ("teams", self.teams),
            ("contracts", self.contracts),
            ("players", self.players),
            ("stats", self.stats),
            ("tournaments", self.tournaments),
            ("participations", self.participations),
        ]
    }

    pub fn total(&self) -> usize {
        self.entries().iter().map(|(_, count)| count).sum()
    }
}

/// Builder for a complete dataset.
///
/// # Example
///
/// ```rust,ignore
/// let builder = DatasetBuilder::new().with_count(25).with_seed(7);
/// let mut rng = builder.rng();
/// let dataset = builder.build_data(&mut EnFaker, &mut rng, today);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    count: usize,
    seed: u64,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates a builder with the default scale and seed.
    pub fn new() -> Self {
        Self::from_config(&SeedConfig::default())
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self {
            count: config.count,
            seed: config.seed,
        }
    }

    /// Sets the scale N.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of users generated: twice the scale, and at least 20.
    pub fn user_count(&self) -> usize {
        (self.count * 2).max(MIN_USERS)
    }

    /// A fresh random source seeded from this builder's seed.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Generates the full dataset without touching the database.
    ///
    /// Generators run in dependency order, so every foreign key points at a
    /// row generated earlier in the same call.
    pub fn build_data(
        &self,
        faker: &mut impl FakeSource,
        rng: &mut impl Rng,
        today: Date,
    ) -> Dataset {
        let start = Instant::now();

        let (users, profiles) =
            UserGenerator::new().generate_batch(self.user_count(), faker, today, rng);

        let games = GameGenerator::new().generate_batch(self.count, faker, today, rng);
        let sponsors = SponsorGenerator::new().generate_batch(self.count, faker, rng);

        let mut team_gen = TeamGenerator::new();
        let teams = team_gen.generate_teams(self.count, faker, today, rng);
        let contracts = team_gen.generate_contracts(&teams, &sponsors, today, rng);

        let player_gen = PlayerGenerator::new();
        let players = player_gen.generate_players(self.count, &users, &teams, faker, rng);
        let stats = player_gen.generate_stats(&players, rng);

        let tournament_gen = TournamentGenerator::new();
        let tournaments =
            tournament_gen.generate_tournaments(self.count, &games, faker, today, rng);
        let participations = tournament_gen.generate_participations(&tournaments, &teams, rng);

        let dataset = Dataset {
            users,
            profiles,
            games,
            sponsors,
            teams,
            contracts,
            players,
            stats,
            tournaments,
            participations,
        };

        debug!(
            "Generated {} rows in {}ms",
            dataset.report().total(),
            start.elapsed().as_millis()
        );

        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EnFaker, SequentialFaker};
    use std::collections::{HashMap, HashSet};
    use time::Month;
    use uuid::Uuid;

    fn today() -> Date {
        Date::from_calendar_date(2025, Month::June, 15).unwrap()
    }

    fn build(builder: &DatasetBuilder) -> Dataset {
        let mut rng = builder.rng();
        builder.build_data(&mut EnFaker, &mut rng, today())
    }

    #[test]
    fn test_default_scale() {
        let dataset = build(&DatasetBuilder::new());
        let report = dataset.report();

        assert!(report.users >= 20);
        assert_eq!(report.profiles, report.users);
        assert_eq!(report.games, 10);
        assert_eq!(report.sponsors, 10);
        assert_eq!(report.teams, 10);
        assert!(report.players <= 10);
        assert_eq!(report.stats, report.players);
        assert_eq!(report.tournaments, 10);
        assert!((10..=30).contains(&report.contracts), "{}", report.contracts);
        assert!(
            (20..=60).contains(&report.participations),
            "{}",
            report.participations
        );
    }

    #[test]
    fn test_user_count_scales_with_count() {
        assert_eq!(DatasetBuilder::new().with_count(3).user_count(), 20);
        assert_eq!(DatasetBuilder::new().with_count(10).user_count(), 20);
        assert_eq!(DatasetBuilder::new().with_count(15).user_count(), 30);
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let builder = DatasetBuilder::new().with_seed(42);
        let first = build(&builder);
        let second = build(&builder);

        assert_eq!(first, second);
        assert_eq!(first.report(), second.report());
    }

    #[test]
    fn test_different_seed_different_dataset() {
        let first = build(&DatasetBuilder::new().with_seed(1));
        let second = build(&DatasetBuilder::new().with_seed(2));

        assert_ne!(first.users[0].id, second.users[0].id);
    }

    #[test]
    fn test_relational_consistency() {
        let dataset = build(&DatasetBuilder::new().with_count(25).with_seed(9));

        let user_ids: HashSet<Uuid> = dataset.users.iter().map(|u| u.id).collect();
        let team_ids: HashSet<Uuid> = dataset.teams.iter().map(|t| t.id).collect();
        let sponsor_ids: HashSet<Uuid> = dataset.sponsors.iter().map(|s| s.id).collect();
        let game_ids: HashSet<Uuid> = dataset.games.iter().map(|g| g.id).collect();
        let player_ids: HashSet<Uuid> = dataset.players.iter().map(|p| p.id).collect();
        let tournament_ids: HashSet<Uuid> = dataset.tournaments.iter().map(|t| t.id).collect();

        let emails: HashSet<&str> = dataset.users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), dataset.users.len());

        let profile_owners: HashSet<Uuid> = dataset.profiles.iter().map(|p| p.user_id).collect();
        assert_eq!(profile_owners, user_ids);

        let player_owners: HashSet<Uuid> = dataset.players.iter().map(|p| p.user_id).collect();
        assert_eq!(player_owners.len(), dataset.players.len());
        assert!(player_owners.is_subset(&user_ids));
        for player in &dataset.players {
            assert!(player.team_id.is_none_or(|id| team_ids.contains(&id)));
        }

        for stats in &dataset.stats {
            assert!(stats.is_consistent());
            assert!(stats.wins >= 0 && stats.wins <= stats.matches_played);
            assert!(player_ids.contains(&stats.player_id));
        }

        let mut contract_pairs: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for contract in &dataset.contracts {
            assert!(sponsor_ids.contains(&contract.sponsor_id));
            let fresh = contract_pairs
                .entry(contract.team_id)
                .or_default()
                .insert(contract.sponsor_id);
            assert!(fresh, "team signed the same sponsor twice");
        }
        assert!(contract_pairs.keys().all(|id| team_ids.contains(id)));

        for tournament in &dataset.tournaments {
            assert!(game_ids.contains(&tournament.game_id));
        }

        let participation_pairs: HashSet<(Uuid, Uuid)> = dataset
            .participations
            .iter()
            .map(|p| (p.team_id, p.tournament_id))
            .collect();
        assert_eq!(participation_pairs.len(), dataset.participations.len());
        for (team_id, tournament_id) in &participation_pairs {
            assert!(team_ids.contains(team_id));
            assert!(tournament_ids.contains(tournament_id));
        }
        assert!(dataset.participations.iter().all(|p| p.final_position > 0));
    }

    /// Every generated string must fit its VARCHAR column.
    fn assert_fits_columns(dataset: &Dataset) {
        let mut checks: Vec<(&str, &str, usize)> = Vec::new();
        for u in &dataset.users {
            checks.push(("users.name", &u.name, 100));
            checks.push(("users.email", &u.email, 254));
        }
        for p in &dataset.profiles {
            checks.push(("profiles.country", &p.country, 50));
        }
        for g in &dataset.games {
            checks.push(("games.name", &g.name, 100));
            checks.push(("games.genre", &g.genre, 50));
            checks.push(("games.developer", &g.developer, 100));
        }
        for s in &dataset.sponsors {
            checks.push(("sponsors.name", &s.name, 100));
            checks.push(("sponsors.industry", &s.industry, 100));
            checks.push(("sponsors.country", &s.country, 50));
        }
        for t in &dataset.teams {
            checks.push(("teams.name", &t.name, 100));
            checks.push(("teams.country", &t.country, 50));
        }
        for p in &dataset.players {
            checks.push(("players.nickname", &p.nickname, 50));
            checks.push(("players.role", &p.role, 50));
            checks.push(("players.nationality", &p.nationality, 50));
        }
        for t in &dataset.tournaments {
            checks.push(("tournaments.name", &t.name, 100));
        }

        for (column, value, width) in checks {
            assert!(
                value.chars().count() <= width,
                "{column} is wider than {width}: {value:?}"
            );
        }
    }

    #[test]
    fn test_values_fit_columns_across_seeds() {
        for seed in 0..300 {
            assert_fits_columns(&build(&DatasetBuilder::new().with_seed(seed)));
        }
        assert_fits_columns(&build(&DatasetBuilder::new().with_count(200)));
    }

    #[test]
    fn test_single_team_and_sponsor() {
        let builder = DatasetBuilder::new().with_count(1);
        let mut rng = builder.rng();
        let dataset = builder.build_data(&mut SequentialFaker::new(), &mut rng, today());

        assert_eq!(dataset.teams.len(), 1);
        assert_eq!(dataset.contracts.len(), 1);
        assert!(dataset.participations.is_empty());
        assert_eq!(dataset.tournaments.len(), 1);
    }

    #[test]
    fn test_zero_count() {
        let builder = DatasetBuilder::new().with_count(0);
        let mut rng = builder.rng();
        let dataset = builder.build_data(&mut SequentialFaker::new(), &mut rng, today());
        let report = dataset.report();

        assert_eq!(report.users, 20);
        assert_eq!(report.total(), 40);
    }

    #[test]
    fn test_failed_report_is_zero() {
        assert_eq!(SeedReport::default().total(), 0);
    }
}
