//! The two-state light phase and its atomic cell.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Red or green.  The light starts red and alternates forever.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Phase {
    #[default]
    Red   = 0,
    Green = 1,
}

impl Phase {
    /// The opposite phase.
    #[inline]
    pub fn toggled(self) -> Phase {
        match self {
            Phase::Red   => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    #[inline]
    pub fn is_green(self) -> bool {
        self == Phase::Green
    }

    #[inline]
    pub fn is_red(self) -> bool {
        self == Phase::Red
    }

    #[inline]
    fn from_u8(raw: u8) -> Phase {
        if raw == Phase::Green as u8 { Phase::Green } else { Phase::Red }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Red   => "red",
            Phase::Green => "green",
        };
        f.pad(s)
    }
}

// ── AtomicPhase ───────────────────────────────────────────────────────────────

/// A `Phase` readable from any thread without a lock.
///
/// Stores pair with loads through Release/Acquire, so a reader that sees a
/// phase also sees every write the cycling task made before publishing it.
#[derive(Debug, Default)]
pub struct AtomicPhase(AtomicU8);

impl AtomicPhase {
    pub fn new(phase: Phase) -> Self {
        AtomicPhase(AtomicU8::new(phase as u8))
    }

    #[inline]
    pub fn load(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, phase: Phase) {
        self.0.store(phase as u8, Ordering::Release);
    }
}
