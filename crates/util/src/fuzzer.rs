use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::script::{Op, OpScript};

/// Environment variable holding a `u64` seed for [`Fuzzer::from_env`].
pub const SEED_ENV: &str = "AVL_FOREST_SEED";

/// A fuzzer for generating random insert/remove workloads.
///
/// Uses the xoshiro256** PRNG for reproducible random sequences when seeded.
///
/// # Examples
///
/// ```
/// use forest_util::Fuzzer;
///
/// let mut fuzzer = Fuzzer::from_u64(7);
/// let script = fuzzer.script(100, 0, 50, 0.3);
/// assert_eq!(script.ops.len(), 100);
/// assert!(script.ops.iter().all(|op| (0..=50).contains(&op.key())));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer from a short numeric seed.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        Self::new(Some(bytes))
    }

    /// Create a fuzzer seeded from [`SEED_ENV`], or randomly when the
    /// variable is unset or not a valid `u64`.
    pub fn from_env() -> Self {
        let seed = std::env::var(SEED_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok());
        match seed {
            Some(seed) => Self::from_u64(seed),
            None => Self::new(None),
        }
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Pick a random element from a slice.
    ///
    /// # Panics
    ///
    /// Panics if `elements` is empty.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Distinct keys from `min..=max` in random order.
    pub fn shuffled_keys(&mut self, min: i64, max: i64) -> Vec<i64> {
        let mut keys: Vec<i64> = (min..=max).collect();
        for i in (1..keys.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            keys.swap(i, j);
        }
        keys
    }

    /// A script of `len` operations over keys in `[min_key, max_key]`.
    ///
    /// Each step is a removal with probability `remove_probability`, an
    /// insert otherwise. Insert values are the step index, so the last write
    /// for a key is always identifiable.
    pub fn script(
        &mut self,
        len: usize,
        min_key: i64,
        max_key: i64,
        remove_probability: f64,
    ) -> OpScript {
        let ops = (0..len)
            .map(|step| {
                let key = self.random_int(min_key, max_key);
                if self.random_bool(remove_probability) {
                    Op::Remove { key }
                } else {
                    Op::Insert {
                        key,
                        value: step as i64,
                    }
                }
            })
            .collect();
        OpScript {
            seed: self.seed,
            ops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzer_random_int() {
        let mut fuzzer = Fuzzer::new(None);

        for _ in 0..100 {
            let n = fuzzer.random_int(1, 10);
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn test_fuzzer_pick() {
        let mut fuzzer = Fuzzer::new(None);
        let choices = vec!["a", "b", "c"];

        for _ in 0..100 {
            let picked = fuzzer.pick(&choices);
            assert!(choices.contains(picked));
        }
    }

    #[test]
    #[should_panic]
    fn test_fuzzer_pick_empty_panics() {
        let mut fuzzer = Fuzzer::from_u64(1);
        let empty: [u8; 0] = [];
        let _ = fuzzer.pick(&empty);
    }

    #[test]
    fn test_fuzzer_reproducible() {
        let mut fuzzer1 = Fuzzer::from_u64(42);
        let mut fuzzer2 = Fuzzer::from_u64(42);

        assert_eq!(fuzzer1.seed, fuzzer2.seed);
        assert_eq!(fuzzer1.script(200, 0, 100, 0.4), fuzzer2.script(200, 0, 100, 0.4));
    }

    #[test]
    fn test_shuffled_keys_is_permutation() {
        let mut fuzzer = Fuzzer::from_u64(3);
        let mut keys = fuzzer.shuffled_keys(-5, 20);
        keys.sort_unstable();
        assert_eq!(keys, (-5..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_script_respects_remove_probability_extremes() {
        let mut fuzzer = Fuzzer::from_u64(11);
        let inserts = fuzzer.script(50, 0, 10, 0.0);
        assert!(inserts.ops.iter().all(|op| matches!(op, Op::Insert { .. })));
        let removes = fuzzer.script(50, 0, 10, 1.0);
        assert!(removes.ops.iter().all(|op| matches!(op, Op::Remove { .. })));
    }
}
