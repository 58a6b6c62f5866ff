//! Configuration types for seed data generation.

use serde::{Deserialize, Serialize};

/// Configuration for a seeding run.
///
/// `count` is the scale N: the number of games, sponsors, teams, tournaments,
/// and the upper bound on players. Users are `max(2 * count, 20)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Scale of the generated dataset.
    pub count: usize,

    /// Seed for the random source; the same seed yields the same dataset.
    pub seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { count: 10, seed: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeedConfig::default();
        assert_eq!(config.count, 10);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SeedConfig = serde_json::from_str(r#"{"count": 25}"#).unwrap();
        assert_eq!(config, SeedConfig { count: 25, seed: 0 });
    }
}
