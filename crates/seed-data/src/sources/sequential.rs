use rand::Rng;

use super::FakeSource;

/// Predictable stand-in for [`EnFaker`](super::EnFaker).
///
/// Every value carries a running counter, so values never repeat and never
/// depend on the RNG. Dates still come from the RNG through the default
/// [`FakeSource::date_between`].
#[derive(Debug, Clone, Default)]
pub struct SequentialFaker {
    counter: u64,
}

impl SequentialFaker {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

impl FakeSource for SequentialFaker {
    fn full_name<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("Person {}", self.next())
    }

    fn email<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("person{}@example.com", self.next())
    }

    fn username<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("gamer_{}", self.next())
    }

    fn word<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("word{}", self.next())
    }

    fn sentence<R: Rng>(&mut self, words: usize, _rng: &mut R) -> String {
        let n = self.next();
        let body: Vec<String> = (0..words).map(|i| format!("w{n}x{i}")).collect();
        format!("{}.", body.join(" "))
    }

    fn country<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("Country {}", self.next())
    }

    fn city<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("City {}", self.next())
    }

    fn company<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("Company {}", self.next())
    }

    fn industry<R: Rng>(&mut self, _rng: &mut R) -> String {
        format!("industry {}", self.next())
    }
}
