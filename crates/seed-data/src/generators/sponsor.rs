//! Sponsor generation.

use esports::Sponsor;
use rand::Rng;

use super::{next_id, round2};
use crate::sources::FakeSource;

/// Bounds of a sponsor's yearly spend.
const ANNUAL_BUDGET_RANGE: (f64, f64) = (50_000.0, 2_000_000.0);

/// Generates sponsors. Names are not required to be unique.
#[derive(Debug, Default)]
pub struct SponsorGenerator;

impl SponsorGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_batch(
        &self,
        count: usize,
        faker: &mut impl FakeSource,
        rng: &mut impl Rng,
    ) -> Vec<Sponsor> {
        (0..count).map(|_| self.generate(faker, rng)).collect()
    }

    pub fn generate(&self, faker: &mut impl FakeSource, rng: &mut impl Rng) -> Sponsor {
        let (min, max) = ANNUAL_BUDGET_RANGE;

        Sponsor {
            id: next_id(rng),
            name: faker.company(rng),
            industry: faker.industry(rng),
            country: faker.country(rng),
            annual_budget: round2(rng.gen_range(min..=max)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SequentialFaker;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_sponsors() {
        let mut rng = StdRng::seed_from_u64(0);
        let sponsors =
            SponsorGenerator::new().generate_batch(25, &mut SequentialFaker::new(), &mut rng);

        assert_eq!(sponsors.len(), 25);
        for sponsor in &sponsors {
            assert!((50_000.0..=2_000_000.0).contains(&sponsor.annual_budget));
            assert_eq!(round2(sponsor.annual_budget), sponsor.annual_budget);
            assert!(!sponsor.industry.is_empty());
        }
    }
}
