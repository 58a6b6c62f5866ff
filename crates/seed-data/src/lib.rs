//! Deterministic seed data for the esports schema.
//!
//! This crate generates a relationally consistent synthetic dataset (users,
//! profiles, games, sponsors, teams, contracts, players, stats, tournaments
//! and participations) and writes it to the database in one transaction.
//! The same seed always yields the same rows, keys included.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let report = Seeder::new(pool)
//!     .run(&SeedConfig::default(), &mut EnFaker, today)
//!     .await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;
pub mod sources;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Dataset, DatasetBuilder, SeedReport};
    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::generators::{
        GameGenerator, PlayerGenerator, SponsorGenerator, TeamGenerator, TournamentGenerator,
        UserGenerator,
    };
    pub use crate::sources::{EnFaker, FakeSource, SequentialFaker};
}
