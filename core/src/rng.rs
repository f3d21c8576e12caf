//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through FeedRng instances derived
//! from the single master seed handed to the engine.
//!
//! Each feed gets its own RNG stream, seeded deterministically
//! from (master_seed XOR slot_index). This means:
//!   - Adding a new feed never changes existing feeds' streams.
//!   - Each feed's stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single feed.
pub struct FeedRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl FeedRng {
    /// Create a feed RNG from the master seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform float in [low, low + span).
    pub fn uniform(&mut self, low: f64, span: f64) -> f64 {
        low + self.next_f64() * span
    }

    /// Pick one entry uniformly from a fixed, non-empty pool.
    pub fn pick<'a, T>(&mut self, pool: &'a [T]) -> &'a T {
        let index = self.next_u64_below(pool.len() as u64) as usize;
        &pool[index]
    }
}

/// All feed RNGs for a single session. Streams live for the whole session
/// so consecutive ticks never replay the same draws.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_feed(&self, slot: FeedSlot) -> FeedRng {
        FeedRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable feed slot assignments.
/// NEVER reorder or remove entries. Append only.
/// Reordering changes every feed's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum FeedSlot {
    Call = 0,
    Claims = 1,
    Network = 2,
    Roi = 3,
    // Add new feeds here. Append only.
}

impl FeedSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Claims => "claims",
            Self::Network => "network",
            Self::Roi => "roi",
        }
    }
}
