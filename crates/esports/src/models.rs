use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use time::Date;
use uuid::Uuid;

/// A query that row values are bound into.
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// A row type backed by a single table with a `UUID` primary key named `id`.
///
/// Implementors get generic list/detail/create/update/delete access through
/// [`Database`](crate::database::Database).
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin {
    const TABLE: &'static str;

    /// Every column, in bind order. `id` is always first.
    const COLUMNS: &'static [&'static str];

    /// Binds this row's values in [`Entity::COLUMNS`] order.
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub registered_on: Date,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub biography: String,
    pub country: String,
    pub birth_date: Option<Date>,
    /// Relative path under `avatars/`.
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub founded_on: Date,
    pub country: String,
    pub budget: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Cleared (not cascaded) when the team is deleted.
    pub team_id: Option<Uuid>,
    pub nickname: String,
    pub role: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub genre: String,
    pub developer: String,
    pub released_on: Date,
}

/// Link row between a player and a game they play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct PlayerGame {
    pub player_id: Uuid,
    pub game_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub game_id: Uuid,
    pub starts_on: Date,
    pub ends_on: Date,
    pub total_prize: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Sponsor {
    pub id: Uuid,
    pub name: String,
    pub industry: String,
    pub country: String,
    pub annual_budget: f64,
}

/// Sponsorship of a team; the through-row of the team/sponsor relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub team_id: Uuid,
    pub sponsor_id: Uuid,
    pub starts_on: Date,
    pub ends_on: Date,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PlayerStats {
    pub id: Uuid,
    pub player_id: Uuid,
    pub matches_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub average_kda: f64,
}

impl PlayerStats {
    /// Whether wins and losses account for every match played.
    pub fn is_consistent(&self) -> bool {
        self.wins >= 0 && self.losses >= 0 && self.wins + self.losses == self.matches_played
    }
}

/// A team's result in a tournament; unique per (team, tournament).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Participation {
    pub id: Uuid,
    pub team_id: Uuid,
    pub tournament_id: Uuid,
    pub final_position: i32,
    pub points: i32,
}

macro_rules! entity {
    ($($ty:ty => $table:literal [$($col:ident),+ $(,)?]),* $(,)?) => {
        $(impl Entity for $ty {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$(stringify!($col)),+];

            fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
                query$(.bind(&self.$col))+
            }
        })*
    };
}

entity! {
    User => "users" [id, name, email, registered_on, is_active],
    Profile => "profiles" [id, user_id, biography, country, birth_date, avatar],
    Team => "teams" [id, name, founded_on, country, budget],
    Player => "players" [id, user_id, team_id, nickname, role, nationality],
    Game => "games" [id, name, genre, developer, released_on],
    Tournament => "tournaments" [id, name, game_id, starts_on, ends_on, total_prize],
    Sponsor => "sponsors" [id, name, industry, country, annual_budget],
    Contract => "contracts" [id, team_id, sponsor_id, starts_on, ends_on, amount],
    PlayerStats => "player_stats" [id, player_id, matches_played, wins, losses, average_kda],
    Participation => "participations" [id, team_id, tournament_id, final_position, points],
}

// Profiles, contracts, stats and participations are labelled from their
// parent rows; see `Database::profile_label` and friends.

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nickname)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Sponsor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stats(matches_played: i32, wins: i32, losses: i32) -> PlayerStats {
        PlayerStats {
            id: Uuid::nil(),
            player_id: Uuid::nil(),
            matches_played,
            wins,
            losses,
            average_kda: 0.0,
        }
    }

    #[test]
    fn test_stats_consistency() {
        assert!(stats(0, 0, 0).is_consistent());
        assert!(stats(10, 7, 3).is_consistent());
        assert!(!stats(10, 7, 2).is_consistent());
        assert!(!stats(10, 11, -1).is_consistent());
    }

    #[test]
    fn test_labels() {
        let player = Player {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            team_id: None,
            nickname: "faker".to_string(),
            role: "Mid".to_string(),
            nationality: "Korea".to_string(),
        };
        assert_eq!(player.to_string(), "faker");
    }

    #[test]
    fn test_table_names() {
        assert_eq!(User::TABLE, "users");
        assert_eq!(PlayerStats::TABLE, "player_stats");
        assert_eq!(Participation::TABLE, "participations");
    }

    #[test]
    fn test_columns_start_with_id() {
        let columns = [
            User::COLUMNS,
            Profile::COLUMNS,
            Team::COLUMNS,
            Player::COLUMNS,
            Game::COLUMNS,
            Tournament::COLUMNS,
            Sponsor::COLUMNS,
            Contract::COLUMNS,
            PlayerStats::COLUMNS,
            Participation::COLUMNS,
        ];
        for cols in columns {
            assert_eq!(cols[0], "id");
        }
        assert_eq!(
            User::COLUMNS,
            ["id", "name", "email", "registered_on", "is_active"]
        );
    }
}
