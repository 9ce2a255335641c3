//! Deterministic random number generation.
//!
//! The engine only needs randomness to shuffle the route deck at game start,
//! but every consumer (deck shuffles, random playouts in tests, AI
//! collaborators) goes through `GameRng` so a match replays identically from
//! its seed.
//!
//! ```
//! use siege_routes::core::GameRng;
//!
//! let mut a: Vec<u8> = (0..28).collect();
//! let mut b = a.clone();
//! GameRng::new(7).for_context("deck").shuffle(&mut a);
//! GameRng::new(7).for_context("deck").shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a named purpose.
    ///
    /// The deck shuffle uses `for_context("deck")` so that adding other
    /// random consumers later never changes which cards a seed deals.
    /// `FxHasher` over fixed-width input gives the same stream on every
    /// toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        hasher.write_usize(context.len());
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(mut rng: GameRng) -> Vec<u8> {
        let mut data: Vec<u8> = (0..28).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        assert_eq!(shuffled(GameRng::new(42)), shuffled(GameRng::new(42)));
        assert_ne!(shuffled(GameRng::new(42)), shuffled(GameRng::new(43)));
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        assert_ne!(shuffled(rng.for_context("deck")), shuffled(rng.for_context("playout")));
        assert_ne!(shuffled(rng.for_context("deck")), shuffled(GameRng::new(43).for_context("deck")));
    }

    #[test]
    fn test_context_stream_is_stable() {
        let first = GameRng::new(42).for_context("deck");
        let second = GameRng::new(42).for_context("deck");
        assert_eq!(first.seed(), second.seed());
        assert_eq!(shuffled(first), shuffled(second));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u8> = (0..28).collect();

        rng.shuffle(&mut data);
        assert_ne!(data, (0..28).collect::<Vec<u8>>());

        data.sort_unstable();
        assert_eq!(data, (0..28).collect::<Vec<u8>>());
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = [1, 2, 3];
        assert!(items.contains(rng.choose(&items).unwrap()));

        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
