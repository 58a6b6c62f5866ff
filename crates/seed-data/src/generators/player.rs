//! Player and player statistics generation.

use esports::{Player, PlayerStats, Team};
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use super::user::GeneratedUser;
use super::{next_id, round2};
use crate::sources::FakeSource;

/// In-game roles stored in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Top,
    Mid,
    Adc,
    Support,
    Jungle,
    Shotcaller,
    Coach,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Top,
        Role::Mid,
        Role::Adc,
        Role::Support,
        Role::Jungle,
        Role::Shotcaller,
        Role::Coach,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Mid => "Mid",
            Role::Adc => "ADC",
            Role::Support => "Support",
            Role::Jungle => "Jungle",
            Role::Shotcaller => "Shotcaller",
            Role::Coach => "Coach",
        }
    }
}

/// Configuration for player generation.
#[derive(Debug, Clone)]
pub struct PlayerGenConfig {
    /// Probability that a player is offered a team. An offered player can
    /// still end up teamless, since "no team" is one of the choices.
    pub team_assignment_rate: f64,
    /// Nicknames are cut to this many characters.
    pub max_nickname_len: usize,
    /// Upper bound of matches played.
    pub max_matches: i32,
    /// Average KDA range for players with at least one match.
    pub kda_range: (f64, f64),
}

impl Default for PlayerGenConfig {
    fn default() -> Self {
        Self {
            team_assignment_rate: 0.85,
            max_nickname_len: 30,
            max_matches: 200,
            kda_range: (0.5, 10.0),
        }
    }
}

/// Generates players and their stats.
pub struct PlayerGenerator {
    config: PlayerGenConfig,
}

impl PlayerGenerator {
    /// Creates a new player generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: PlayerGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: PlayerGenConfig) -> Self {
        Self { config }
    }

    /// Generates up to `count` players, each bound to a different user.
    ///
    /// Users are drawn from a random permutation without replacement; fewer
    /// than `count` players are produced when users run out.
    pub fn generate_players(
        &self,
        count: usize,
        users: &[GeneratedUser],
        teams: &[Team],
        faker: &mut impl FakeSource,
        rng: &mut impl Rng,
    ) -> Vec<Player> {
        let mut available: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        available.shuffle(rng);

        let mut players = Vec::with_capacity(count.min(available.len()));

        for _ in 0..count {
            let Some(user_id) = available.pop() else {
                break;
            };

            let nickname: String = faker
                .username(rng)
                .chars()
                .take(self.config.max_nickname_len)
                .collect();
            let team_id = self.pick_team(teams, rng);
            let role = Role::ALL.choose(rng).copied().unwrap_or(Role::Mid);
            let nationality = faker.country(rng);

            players.push(Player {
                id: next_id(rng),
                user_id,
                team_id,
                nickname,
                role: role.as_str().to_string(),
                nationality,
            });
        }

        players
    }

    /// Picks a team uniformly from the teams plus "no team", or no team at all.
    fn pick_team(&self, teams: &[Team], rng: &mut impl Rng) -> Option<Uuid> {
        if !rng.gen_bool(self.config.team_assignment_rate) {
            return None;
        }
        let idx = rng.gen_range(0..=teams.len());
        teams.get(idx).map(|t| t.id)
    }

    /// Generates exactly one stats row per player.
    ///
    /// Wins are drawn from `0..=matches_played` and losses take the rest, so
    /// `wins + losses == matches_played` always holds.
    pub fn generate_stats(&self, players: &[Player], rng: &mut impl Rng) -> Vec<PlayerStats> {
        players
            .iter()
            .map(|player| {
                let matches_played = rng.gen_range(0..=self.config.max_matches);
                let wins = rng.gen_range(0..=matches_played);
                let losses = matches_played - wins;
                let average_kda = if matches_played > 0 {
                    let (min, max) = self.config.kda_range;
                    round2(rng.gen_range(min..=max))
                } else {
                    0.0
                };

                PlayerStats {
                    id: next_id(rng),
                    player_id: player.id,
                    matches_played,
                    wins,
                    losses,
                    average_kda,
                }
            })
            .collect()
    }
}

impl Default for PlayerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
