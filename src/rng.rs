//! Seedable random source owned by the game and lent to the board generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct GemRng {
    rng: StdRng,
    seed: u64,
}

impl GemRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    /// Seed this source was created from; logged so a board can be replayed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Palette colours `0..palette` in random order.
    pub fn shuffled_palette(&mut self, palette: u8) -> Vec<u8> {
        let mut colors: Vec<u8> = (0..palette).collect();
        colors.shuffle(&mut self.rng);
        colors
    }
}

impl Default for GemRng {
    fn default() -> Self {
        Self::from_random()
    }
}
