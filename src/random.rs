//! Seeded random number generation.
//!
//! Every random draw in a simulation comes from a single [`StdRng`]
//! owned by the population, so a fixed seed reproduces a run exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional seed, drawing a fresh one from the OS-seeded
/// thread RNG when `None`.
///
/// Returns the seed actually used so that callers can log or replay it.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
