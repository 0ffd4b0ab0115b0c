//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through TableRng instances derived
//! from the single master seed held by the dashboard config.
//!
//! Each random table gets its own stream, seeded deterministically
//! from (master_seed XOR table_index). This means:
//!   - Adding a new table never changes existing tables' values.
//!   - Each table is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single table.
pub struct TableRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl TableRng {
    /// Create a table RNG from the master seed and a stable
    /// table index. The index must never change once assigned.
    pub fn new(master_seed: u64, table_index: u64) -> Self {
        let derived_seed = master_seed ^ (table_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
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

    /// Roll an integer in [low, high). Callers validate `high > low`.
    pub fn int_in(&mut self, low: i64, high: i64) -> i64 {
        assert!(high > low, "empty integer range [{low}, {high})");
        let span = high.abs_diff(low);
        low.wrapping_add(self.next_u64_below(span) as i64)
    }

    /// Roll a float in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// All table RNGs for a single generation pass, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_table(&self, slot: TableSlot) -> TableRng {
        TableRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable table slot assignments.
/// NEVER reorder or remove entries. Append only.
/// Reordering changes every table's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum TableSlot {
    Portfolio = 0,
    Regional = 1,
    // Append new random tables here.
}

impl TableSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Regional => "regional",
        }
    }
}
