use crate::GridRule;
use rand::{rngs::StdRng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Draws `count` distinct values from the rule's range by rerolling
    /// duplicates. Values keep the order they were accepted in.
    pub fn sample_distinct(&mut self, rule: GridRule, count: usize) -> Vec<u8> {
        let target = count.min(rule.span() as usize);
        let mut picks = Vec::with_capacity(target);
        while picks.len() < target {
            let roll = rule.min + (self.next_u64() % rule.span()) as u8;
            if !picks.contains(&roll) {
                picks.push(roll);
            }
        }
        picks
    }
}
