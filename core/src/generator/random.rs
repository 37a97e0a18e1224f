use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Uniform picks from a seeded small RNG, so a seed always yields the same board.
#[derive(Clone, Debug)]
pub struct RandomPicker {
    rng: SmallRng,
}

impl RandomPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl IndexPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            // nothing to draw from, hand back an index the caller rejects
            return 0;
        }
        self.rng.random_range(0..len)
    }
}
