//! Relational data model for an esports management application.
//!
//! Tables and their constraints live in `migrations/`; [`schema::RELATIONS`]
//! declares the deletion policy of every foreign key and
//! [`database::Database`] exposes list/detail/create/update/delete access,
//! the relationship accessors and labels for link rows.

pub mod database;
pub mod errors;
pub mod models;
pub mod schema;

pub use database::{Database, migrate};
pub use errors::DbError;
pub use models::{
    Contract, Entity, Game, Participation, PgQuery, Player, PlayerGame, PlayerStats, Profile,
    Sponsor, Team, Tournament, User,
};
