use rand::Rng;

const MULTIPLIER: i64 = 1103515245;
const INCREMENT: i64 = 12345;
const MODULUS: i64 = i32::MAX as i64;
const DEFAULT_SEED: i64 = 3819201;

/// Source of randomness for child picking, rollouts and the random strategy.
///
/// Engines take the generator from the caller, so tests can inject a seeded one and get
/// reproducible searches.
pub trait RandomGenerator: Default {
    /// Returns the next raw number of the sequence.
    fn next(&mut self) -> i32;

    /// Returns a number in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Returns a uniformly chosen index below `len`, or `None` when `len` is zero.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let upper = i32::try_from(len).unwrap_or(i32::MAX);
        Some(self.next_range(0, upper) as usize)
    }

    /// Returns a uniformly chosen element of `items`, or `None` when it is empty.
    fn pick_from_slice<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        let index = self.pick_index(items.len())?;
        items.get(index)
    }
}

/// Draws from the thread-local generator of `rand`. Not reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        rand::random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        rand::rng().random_range(from..to)
    }
}

/// Linear congruential generator with a fixed seed. Same seed, same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomNumberGenerator {
    state: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        // state stays below MODULUS, so the product cannot leave i64
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        self.next().rem_euclid(to - from) + from
    }
}

impl CustomNumberGenerator {
    /// Creates a generator from any seed. Seeds are reduced modulo `i32::MAX`, so seeds
    /// that differ by a multiple of it produce the same sequence.
    pub const fn new(seed: i64) -> Self {
        Self {
            state: seed.rem_euclid(MODULUS),
        }
    }
}
