//! Fisher–Yates shuffle.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ShuffleConfig;

/// A uniformly random permutation of `seq`, using the thread-local RNG.
pub fn shuffle<T: Clone>(seq: &[T]) -> Vec<T> {
    shuffle_with(seq, &mut rand::thread_rng())
}

/// A reproducible permutation of `seq` for a given seed.
pub fn shuffle_seeded<T: Clone>(seq: &[T], seed: u64) -> Vec<T> {
    shuffle_with(seq, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// A permutation of `seq` drawn from the generator `config` describes:
/// reproducible when `[shuffle] seed` is set, entropy-seeded otherwise.
pub fn shuffle_configured<T: Clone>(seq: &[T], config: &ShuffleConfig) -> Vec<T> {
    shuffle_with(seq, &mut config.rng())
}

/// A uniformly random permutation of `seq` drawn from `rng`.
///
/// Copies the input once, then walks it from the back, swapping each slot
/// with a uniformly chosen slot at or before it.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(seq: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = seq.to_vec();
    let mut i = shuffled.len();
    while i > 1 {
        let j = rng.gen_range(0..i);
        i -= 1;
        shuffled.swap(i, j);
    }
    shuffled
}
