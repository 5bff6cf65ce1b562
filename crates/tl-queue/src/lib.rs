//! `tl-queue` — the blocking hand-off between a light's cycling task and the
//! callers waiting on it.
//!
//! # Crate layout
//!
//! | Module     | Contents                                  |
//! |------------|-------------------------------------------|
//! | [`queue`]  | `PhaseQueue<T>`, `PopOrder`               |
//!
//! # Hand-off model (summary)
//!
//! ```text
//! producer ── push(v) ──► [ Mutex<VecDeque<T>> ] ── blocking_pop() ──► one consumer
//!                  └── notify_one ──► Condvar ──► wakes one blocked consumer
//! ```
//!
//! Each pushed value is delivered to exactly one consumer.  There is no
//! broadcast: with several consumers blocked, one of them gets the value and
//! the rest keep waiting.

pub mod queue;


pub use queue::{PhaseQueue, PopOrder};
