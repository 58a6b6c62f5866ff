//! Fluent builder for complete seed datasets.
//!
//! The [`DatasetBuilder`] runs every generator in foreign-key dependency
//! order and returns a [`Dataset`] ready for the [`Seeder`](crate::db::Seeder).

mod dataset;

pub use dataset::{Dataset, DatasetBuilder, SeedReport};
