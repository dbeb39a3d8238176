//! Attack selection policy.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::catalog::AttackCatalog;

/// Random source owned by one encounter.
pub type EncounterRng = Box<dyn RngCore + Send + Sync>;

/// Seeded generator for reproducible fights, entropy-seeded otherwise.
pub fn encounter_rng(seed: Option<u64>) -> EncounterRng {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(ChaCha8Rng::from_entropy()),
    }
}

/// Pick an attack uniformly among the eligible ones.
///
/// `None` means nothing is usable right now and the boss should close in.
pub fn select_attack<R: Rng + ?Sized>(
    catalog: &AttackCatalog,
    distance: f32,
    now: f32,
    rng: &mut R,
) -> Option<usize> {
    let eligible = catalog.eligible(distance, now);
    if eligible.is_empty() {
        return None;
    }

    Some(eligible[rng.gen_range(0..eligible.len())])
}
