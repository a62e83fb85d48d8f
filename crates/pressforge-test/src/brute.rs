//! Reference solver.

use pressforge_core::Machine;

/// Minimal total presses by plain enumeration of every assignment within the
/// per-button bounds, or `None` if no assignment hits the target.
///
/// Walks the assignments like an odometer: the first button is the fastest
/// digit and each digit rolls over after its `max_presses`.
pub fn brute_force_min(machine: &Machine) -> Option<u64> {
    let bounds = machine.max_presses();
    let mut presses = vec![0u32; bounds.len()];
    let mut best: Option<u64> = None;

    loop {
        let counters = machine.accumulate(&presses).expect("lengths match");
        if counters == machine.target() {
            let total: u64 = presses.iter().map(|&p| u64::from(p)).sum();
            best = Some(best.map_or(total, |b| b.min(total)));
        }
        if !advance(&mut presses, &bounds) {
            return best;
        }
    }
}

fn advance(presses: &mut [u32], bounds: &[u32]) -> bool {
    for (digit, &bound) in presses.iter_mut().zip(bounds) {
        if *digit < bound {
            *digit += 1;
            return true;
        }
        *digit = 0;
    }
    false
}
