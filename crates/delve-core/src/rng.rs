//! Random number generation for level generation
//!
//! Uses a seeded ChaCha RNG so that a level is reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// FNV-1a 64-bit offset basis
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation. The generator
/// always receives one of these explicitly; there is no process-wide instance.
/// Note: RNG state is not serialized - a restored RNG restarts from its seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a player-supplied seed phrase
    ///
    /// The phrase is hashed with FNV-1a; the empty phrase maps to seed 1.
    pub fn from_seed_str(phrase: &str) -> Self {
        Self::new(seed_from_str(phrase))
    }

    /// Create a new RNG with a random seed
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns a value in `lo..=hi`, or `None` when the range is empty
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> Option<i32> {
        if hi < lo {
            return None;
        }
        Some(lo + self.rn2((hi - lo) as u32 + 1) as i32)
    }

    /// Returns true with probability 1/2
    pub fn coin(&mut self) -> bool {
        self.rn2(2) == 1
    }
}

#[cfg(feature = "std")]
impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Hash a seed phrase into a numeric seed (FNV-1a, 64 bit)
pub fn seed_from_str(phrase: &str) -> u64 {
    if phrase.is_empty() {
        return 1;
    }
    phrase.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}
