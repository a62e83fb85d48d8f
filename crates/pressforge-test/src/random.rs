//! Seeded random machines.

use pressforge_core::Machine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for reproducible tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A machine with 1..=4 counters, 1..=4 buttons and targets in 0..=4.
///
/// Small enough that [`brute_force_min`](crate::brute_force_min) enumerates
/// it in well under a millisecond.
pub fn random_machine<R: Rng>(rng: &mut R, index: usize) -> Machine {
    let counters = rng.random_range(1..=4);
    let target: Vec<u32> = (0..counters).map(|_| rng.random_range(0..=4)).collect();

    let buttons = (0..rng.random_range(1..=4))
        .map(|_| {
            let mut touched: Vec<usize> =
                (0..counters).filter(|_| rng.random_bool(0.5)).collect();
            if touched.is_empty() {
                touched.push(rng.random_range(0..counters));
            }
            touched
        })
        .collect();

    Machine::new(index, buttons, target).expect("random machine is valid")
}
