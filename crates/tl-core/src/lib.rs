//! `tl-core` — foundational types for the traffic light simulation.
//!
//! This crate has no `tl-*` dependencies and minimal external ones (only
//! `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`phase`]   | `Phase`, `AtomicPhase`                                    |
//! | [`cycle`]   | `CycleConfig`, `DurationProvider` and its implementations |
//! | [`rng`]     | `CycleRng` (seeded)                                       |
//! | [`error`]   | `TlError`, `TlResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Phase` and `CycleConfig`. |

pub mod cycle;
pub mod error;
pub mod phase;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cycle::{CycleConfig, DurationProvider, FixedDuration, RandomDurations, SequenceDurations};
pub use error::{TlError, TlResult};
pub use phase::{AtomicPhase, Phase};
pub use rng::CycleRng;
