use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed offsets for random play.
pub(crate) trait RandomSource: Send + Sync {
    /// Offset in `0..count`. Callers never pass zero.
    fn pick(&self, count: u64) -> u64;
}

pub(crate) struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, count: u64) -> u64 {
        rand::thread_rng().gen_range(0..count)
    }
}

/// Reproducible sequence, for demos and debugging.
pub(crate) struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub(crate) fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, count: u64) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..count)
    }
}

pub(crate) fn from_seed(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    }
}
