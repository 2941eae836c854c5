//! Cross-cutting helpers: logging setup and RNG seeding.

pub mod logging;
pub mod rng;
