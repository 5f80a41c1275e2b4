//! RNG module - deterministic tile and target generation
//!
//! All randomness in the game (tile values, targets) flows through a
//! seedable generator so that a given seed reproduces an identical game.
//! Tile ids come from a monotonic counter owned by the same generator,
//! which gives the uniqueness the rules require without a second source.

use sumstack_types::{TileId, TARGET_MAX, TARGET_MIN, TILE_VALUE_MAX, TILE_VALUE_MIN};

use crate::grid::Tile;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Generate random value in range [min, max] (inclusive)
    pub fn next_between(&mut self, min: u32, max: u32) -> u32 {
        min + self.next_range(max - min + 1)
    }
}

/// Generator for fresh tiles and targets.
///
/// Owns the RNG and the id counter, so cloning a `TileGen` (or the state
/// holding it) forks the whole random future of a game.
#[derive(Debug, Clone)]
pub struct TileGen {
    rng: SimpleRng,
    next_id: u32,
}

impl TileGen {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            // Ids start at 1 so 0 can mean "empty" in snapshots.
            next_id: 1,
        }
    }

    /// Draw a fresh unique tile id
    pub fn id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Draw a uniform tile value in [1, 9]
    pub fn value(&mut self) -> u8 {
        self.rng
            .next_between(TILE_VALUE_MIN as u32, TILE_VALUE_MAX as u32) as u8
    }

    /// Draw a uniform target in [10, 25]
    pub fn target(&mut self) -> u8 {
        self.rng.next_between(TARGET_MIN as u32, TARGET_MAX as u32) as u8
    }

    /// Materialize a fresh tile at the given slot
    pub fn tile(&mut self, row: u8, col: u8) -> Tile {
        Tile {
            id: self.id(),
            value: self.value(),
            row,
            col,
        }
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for TileGen {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_next_between_inclusive_bounds() {
        let mut rng = SimpleRng::new(9);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..10_000 {
            let v = rng.next_between(1, 9);
            assert!((1..=9).contains(&v));
            seen_min |= v == 1;
            seen_max |= v == 9;
        }
        assert!(seen_min);
        assert!(seen_max);
    }

    #[test]
    fn test_tile_values_in_range() {
        let mut gen = TileGen::new(42);
        for _ in 0..1_000 {
            let v = gen.value();
            assert!((TILE_VALUE_MIN..=TILE_VALUE_MAX).contains(&v));
        }
    }

    #[test]
    fn test_targets_in_range() {
        let mut gen = TileGen::new(42);
        for _ in 0..1_000 {
            let t = gen.target();
            assert!((TARGET_MIN..=TARGET_MAX).contains(&t));
        }
    }

    #[test]
    fn test_ids_unique_and_monotonic() {
        let mut gen = TileGen::new(1);
        let mut prev = gen.id();
        for _ in 0..100 {
            let next = gen.id();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_ids_never_zero() {
        let mut gen = TileGen::new(77);
        for _ in 0..100 {
            assert_ne!(gen.id(), TileId(0));
        }
    }

    #[test]
    fn test_same_seed_same_tiles() {
        let mut a = TileGen::new(555);
        let mut b = TileGen::new(555);
        for _ in 0..50 {
            let ta = a.tile(3, 2);
            let tb = b.tile(3, 2);
            assert_eq!(ta.id, tb.id);
            assert_eq!(ta.value, tb.value);
        }
    }
}
