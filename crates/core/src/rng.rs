//! RNG module - piece-type sources
//!
//! The game never generates randomness itself: it consumes piece kinds through
//! the [`PieceSource`] capability (`pop`, `peek`, `reset`). This module provides
//! the sources used by the runner and the tests:
//!
//! - [`BagSource`]: the "7-bag" randomizer (each bag holds one of every kind, shuffled)
//! - [`UniformSource`]: independent uniform draws
//! - [`SequenceSource`]: a fixed, repeating list of kinds
//!
//! All randomness comes from a small LCG so sequences are reproducible per seed.

use std::collections::VecDeque;

use crate::types::{PieceKind, PIECE_COUNT};

/// Supplier of upcoming piece kinds.
pub trait PieceSource {
    /// Consume and return the next kind
    fn pop(&mut self) -> PieceKind;

    /// Return the next kind without consuming it; the following `pop` agrees
    fn peek(&self) -> PieceKind;

    /// Restart the sequence from its initial seed
    fn reset(&mut self);

    /// Replace the seed and restart; sources without randomness ignore this
    fn reseed(&mut self, _seed: u64) {
        self.reset();
    }
}

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
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Fold a 64-bit seed into the LCG's 32-bit state
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSource {
    seed: u32,
    /// Current bag of pieces
    bag: [PieceKind; PIECE_COUNT],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl BagSource {
    /// Create a new bag source with the given seed
    pub fn new(seed: u32) -> Self {
        let mut source = Self {
            seed,
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        source.refill_bag();
        source
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl PieceSource for BagSource {
    fn pop(&mut self) -> PieceKind {
        if self.bag_index >= PIECE_COUNT {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    fn peek(&self) -> PieceKind {
        if let Some(&kind) = self.bag.get(self.bag_index) {
            return kind;
        }

        // Preview the next bag on a cloned RNG; `pop` will refill from the same
        // state and therefore produce the same first piece.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::new(fold_seed(seed));
    }
}

impl Default for BagSource {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Independent uniform draws over the catalog
#[derive(Debug, Clone)]
pub struct UniformSource {
    seed: u32,
    rng: SimpleRng,
    next: PieceKind,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::draw(&mut rng);
        Self { seed, rng, next }
    }

    fn draw(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PIECE_COUNT as u32) as usize]
    }
}

impl PieceSource for UniformSource {
    fn pop(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = Self::draw(&mut self.rng);
        kind
    }

    fn peek(&self) -> PieceKind {
        self.next
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::new(fold_seed(seed));
    }
}

/// Repeats a fixed list of kinds forever
#[derive(Debug, Clone)]
pub struct SequenceSource {
    initial: Vec<PieceKind>,
    queue: VecDeque<PieceKind>,
}

impl SequenceSource {
    /// An empty list falls back to the full catalog in ordinal order.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut initial: Vec<PieceKind> = kinds.into_iter().collect();
        if initial.is_empty() {
            initial = PieceKind::ALL.to_vec();
        }
        let queue = initial.iter().copied().collect();
        Self { initial, queue }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for SequenceSource {
    fn pop(&mut self) -> PieceKind {
        if self.queue.is_empty() {
            self.queue.extend(self.initial.iter().copied());
        }
        self.queue.pop_front().unwrap_or(PieceKind::O)
    }

    fn peek(&self) -> PieceKind {
        self.queue
            .front()
            .or(self.initial.first())
            .copied()
            .unwrap_or(PieceKind::O)
    }

    fn reset(&mut self) {
        self.queue = self.initial.iter().copied().collect();
    }
}
