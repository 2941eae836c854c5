//! Explicit RNG construction.
//!
//! Randomized algorithms never reach for process-global random state; they
//! own a generator built here, either from an explicit seed or from the
//! `RNG_SEED` environment variable (falling back to OS entropy).

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Environment variable consulted when no explicit seed is given.
pub const RNG_SEED_ENV: &str = "RNG_SEED";

/// RNG seeded from `RNG_SEED` when set to a valid `u64`, else from entropy.
pub fn rng_from_env() -> StdRng {
    match std::env::var(RNG_SEED_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
    {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// RNG from an explicit seed, deferring to [`rng_from_env`] when absent.
pub fn rng_with(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => rng_from_env(),
    }
}
