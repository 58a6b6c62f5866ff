//! Tournament and participation generation.

use std::collections::HashSet;

use esports::{Game, Participation, Team, Tournament};
use rand::Rng;
use rand::seq::SliceRandom;
use time::Date;
use tracing::warn;
use uuid::Uuid;

use super::{cents, date_window, next_id};
use crate::sources::FakeSource;

/// Tournament start is at most this many days ago.
const MAX_DAYS_AGO: i64 = 500;

/// Tournaments last 1 to this many days.
const MAX_LENGTH_DAYS: i64 = 60;

/// Prize pool bounds, in cents.
const PRIZE_CENTS: (i64, i64) = (100_000, 20_000_000);

const MIN_PARTICIPANTS: usize = 2;
const MAX_PARTICIPANTS: usize = 6;

/// Highest points a team can score in one tournament.
const MAX_POINTS: i32 = 100;

/// Generates tournaments and ranks participating teams.
#[derive(Debug, Default)]
pub struct TournamentGenerator;

impl TournamentGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates tournaments, each for a randomly chosen game.
    ///
    /// Returns nothing when there are no games to host them.
    pub fn generate_tournaments(
        &self,
        count: usize,
        games: &[Game],
        faker: &mut impl FakeSource,
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<Tournament> {
        if games.is_empty() {
            return Vec::new();
        }

        let mut tournaments = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(game) = games.choose(rng) else {
                break;
            };
            let (starts_on, ends_on) = date_window(today, MAX_DAYS_AGO, MAX_LENGTH_DAYS, rng);
            let name = format!("{} {} Cup", faker.city(rng), rng.gen_range(1..=999));
            let (min, max) = PRIZE_CENTS;

            tournaments.push(Tournament {
                id: next_id(rng),
                name,
                game_id: game.id,
                starts_on,
                ends_on,
                total_prize: cents(rng, min, max),
            });
        }

        tournaments
    }

    /// Samples 2 to 6 distinct teams per tournament and ranks them by points.
    ///
    /// Positions are 1-based with the highest score first; ties keep the
    /// sampled order. A (team, tournament) pair that was already produced is
    /// skipped rather than emitted twice. Returns nothing with fewer than two
    /// teams.
    pub fn generate_participations(
        &self,
        tournaments: &[Tournament],
        teams: &[Team],
        rng: &mut impl Rng,
    ) -> Vec<Participation> {
        if teams.len() < MIN_PARTICIPANTS {
            return Vec::new();
        }

        let max_participants = MAX_PARTICIPANTS.min(teams.len());
        let mut seen: HashSet<(Uuid, Uuid)> = HashSet::new();
        let mut participations = Vec::new();

        for tournament in tournaments {
            let count = rng.gen_range(MIN_PARTICIPANTS..=max_participants);
            let sampled: Vec<Uuid> = teams.choose_multiple(rng, count).map(|t| t.id).collect();
            let mut scored: Vec<(Uuid, i32)> = sampled
                .into_iter()
                .map(|team_id| (team_id, rng.gen_range(0..=MAX_POINTS)))
                .collect();

            // Stable sort, so equal scores keep their sampled order
            scored.sort_by(|a, b| b.1.cmp(&a.1));

            for (position, (team_id, points)) in scored.into_iter().enumerate() {
                if !seen.insert((team_id, tournament.id)) {
                    warn!(
                        "Skipping duplicate participation of team {} in tournament {}",
                        team_id, tournament.id
                    );
                    continue;
                }

                participations.push(Participation {
                    id: next_id(rng),
                    team_id,
                    tournament_id: tournament.id,
                    final_position: position as i32 + 1,
                    points,
                });
            }
        }

        participations
    }
}
