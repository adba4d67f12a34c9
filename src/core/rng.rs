//! Seeded randomness for agents.
//!
//! The rules engine itself is fully deterministic; only agents draw random
//! numbers. A match seeded once can hand each agent its own stream with
//! [`GameRng::fork`], so replaying the same seed replays the same match.
//!
//! ```
//! use bagh_chal::core::GameRng;
//!
//! let mut master = GameRng::new(7);
//! let goat_stream = master.fork();
//! let tiger_stream = master.fork();
//! assert_ne!(goat_stream.seed(), tiger_stream.seed());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment spreading fork seeds across the u64 space.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child stream. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform index in `0..len`; `None` when `len` is zero.
    pub fn index_below(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.stream.gen_range(0..len))
    }

    /// Uniformly pick one element of `items`.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index_below(items.len()).and_then(|i| items.get(i))
    }
}
