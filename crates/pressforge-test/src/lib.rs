//! Shared test fixtures for PressForge crates.
//!
//! - [`scenarios`] - small hand-checked machines and the three-machine sample batch
//! - [`random`] - seeded random machines small enough to brute-force
//! - [`brute`] - reference solver that enumerates every assignment
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! pressforge-test = { workspace = true }
//! ```
//!
//! ```
//! use pressforge_test::{brute_force_min, scenario_c};
//!
//! assert_eq!(brute_force_min(&scenario_c()), Some(5));
//! ```

pub mod brute;
pub mod random;
pub mod scenarios;

pub use brute::brute_force_min;
pub use random::{random_machine, seeded_rng};
pub use scenarios::{
    sample_batch, scenario_a, scenario_b, scenario_batch, scenario_c, SAMPLE_LINES, SAMPLE_SUM,
};
