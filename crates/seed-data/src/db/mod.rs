//! Database integration for seeding.
//!
//! The [`Seeder`] writes a generated [`Dataset`](crate::builders::Dataset)
//! inside a single transaction: existing rows are cleared and the new rows
//! inserted, or nothing changes at all.

mod seeder;

pub use seeder::{SeedError, Seeder};
