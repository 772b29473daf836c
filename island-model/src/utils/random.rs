#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use crate::utils::Float;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::cell::RefCell;
use std::sync::Mutex;

/// Provides the way to use randomized values in generic way.
pub trait Random: Send + Sync {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max]
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the half-open interval [min, max)
    fn uniform_real(&self, min: Float, max: Float) -> Float;

    /// Produces real random value from normal distribution.
    fn normal(&self, mean: Float, std_dev: Float) -> Float;

    /// Returns a generator forked from this random, usable with `rand` algorithms such as
    /// `SliceRandom::shuffle`. Forking advances the source, so repeatable randoms stay repeatable.
    fn get_rng(&self) -> RandomGen;

    /// Returns true with given probability, which is clamped to [0, 1] range.
    fn is_hit(&self, probability: Float) -> bool {
        let probability = probability.clamp(0., 1.);

        if probability == 0. {
            false
        } else if probability == 1. {
            true
        } else {
            self.uniform_real(0., 1.) < probability
        }
    }
}

/// A default random implementation which uses a thread local generator.
#[derive(Default)]
pub struct DefaultRandom {}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        DEFAULT_RNG.with(|rng| rng.borrow_mut().gen_range(min..max + 1))
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        if (min - max).abs() < Float::EPSILON {
            return min;
        }

        assert!(min < max);
        DEFAULT_RNG.with(|rng| rng.borrow_mut().gen_range(min..max))
    }

    fn normal(&self, mean: Float, std_dev: Float) -> Float {
        DEFAULT_RNG.with(|rng| sample_normal(&mut *rng.borrow_mut(), mean, std_dev))
    }

    fn get_rng(&self) -> RandomGen {
        DEFAULT_RNG.with(|rng| RandomGen::fork(&mut *rng.borrow_mut()))
    }
}

thread_local! {
    static DEFAULT_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_entropy());
}

/// A random implementation which produces the same sequence of values for the same seed.
/// The generator is shared between threads, so values are reproducible only when the order
/// of calls is deterministic.
pub struct RepeatableRandom {
    rng: Mutex<SmallRng>,
}

impl RepeatableRandom {
    /// Creates a new instance of `RepeatableRandom` with given seed.
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(SmallRng::seed_from_u64(seed)) }
    }

    fn with_rng<R>(&self, action: impl FnOnce(&mut SmallRng) -> R) -> R {
        // NOTE a poisoned generator still holds a valid state
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        action(&mut rng)
    }
}

impl Random for RepeatableRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.with_rng(|rng| rng.gen_range(min..max + 1))
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        if (min - max).abs() < Float::EPSILON {
            return min;
        }

        assert!(min < max);
        self.with_rng(|rng| rng.gen_range(min..max))
    }

    fn normal(&self, mean: Float, std_dev: Float) -> Float {
        self.with_rng(|rng| sample_normal(rng, mean, std_dev))
    }

    fn get_rng(&self) -> RandomGen {
        self.with_rng(RandomGen::fork)
    }
}

/// Provides a way to use `rand` algorithms with a `Random` implementation.
pub struct RandomGen {
    rng: SmallRng,
}

impl RandomGen {
    fn fork(source: &mut SmallRng) -> Self {
        Self { rng: SmallRng::seed_from_u64(source.next_u64()) }
    }
}

impl RngCore for RandomGen {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl SeedableRng for RandomGen {
    type Seed = <SmallRng as SeedableRng>::Seed;

    fn from_seed(seed: Self::Seed) -> Self {
        Self { rng: SmallRng::from_seed(seed) }
    }
}

fn sample_normal<R: Rng>(rng: &mut R, mean: Float, std_dev: Float) -> Float {
    match Normal::new(mean, std_dev.abs()) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}
