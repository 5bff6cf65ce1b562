//! Cycle timing model.
//!
//! # Design
//!
//! The cycling task does not sleep for the full cycle.  It polls the
//! monotonic clock every `poll_interval`, truncates the elapsed time to
//! whole `resolution` units, and flips once the truncated value reaches the
//! target duration:
//!
//!   due = units(elapsed) >= 1 && units(elapsed) * resolution >= target
//!
//! With the defaults (1 s resolution, 1 ms poll) a 5 s cycle flips between
//! 5.000 s and 5.001 s after the previous flip.
//!
//! Target durations come from a [`DurationProvider`], so tests can swap the
//! random 4–6 s draw for fixed millisecond cycles.

use std::time::Duration;

use crate::{CycleRng, TlError, TlResult};

const NANOS_PER_SEC: u128 = 1_000_000_000;

// ── CycleConfig ───────────────────────────────────────────────────────────────

/// Timing parameters for one light.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleConfig {
    /// Shortest cycle the default random provider will draw.  Default: 4 s.
    pub min_cycle: Duration,

    /// Longest cycle (inclusive).  Default: 6 s.
    pub max_cycle: Duration,

    /// Elapsed time is truncated to whole multiples of this before it is
    /// compared with the target.  Random draws are whole multiples too.
    /// Default: 1 s.
    pub resolution: Duration,

    /// Sleep between two polls of the clock.  Default: 1 ms.
    pub poll_interval: Duration,

    /// Ask the provider for a fresh duration after every flip instead of
    /// once per task start.
    pub redraw_each_cycle: bool,

    /// Seed for the default [`RandomDurations`] provider.
    pub seed: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_cycle:         Duration::from_secs(4),
            max_cycle:         Duration::from_secs(6),
            resolution:        Duration::from_secs(1),
            poll_interval:     Duration::from_millis(1),
            redraw_each_cycle: false,
            seed:              0,
        }
    }
}

impl CycleConfig {
    /// Reject configurations the cycling task cannot run with.
    pub fn validate(&self) -> TlResult<()> {
        if self.resolution.is_zero() {
            return Err(TlError::Config("resolution must be non-zero".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(TlError::Config("poll_interval must be non-zero".into()));
        }
        if self.min_cycle > self.max_cycle {
            return Err(TlError::Config(format!(
                "min_cycle {:?} exceeds max_cycle {:?}",
                self.min_cycle, self.max_cycle
            )));
        }
        if self.min_cycle < self.resolution {
            return Err(TlError::Config(format!(
                "min_cycle {:?} is shorter than one resolution unit {:?}",
                self.min_cycle, self.resolution
            )));
        }
        Ok(())
    }

    /// Number of whole `resolution` units in `elapsed`.
    #[inline]
    pub fn whole_units(&self, elapsed: Duration) -> u128 {
        elapsed.as_nanos() / self.resolution.as_nanos().max(1)
    }

    /// Has a cycle of length `target` run out after `elapsed`?
    pub fn flip_due(&self, elapsed: Duration, target: Duration) -> bool {
        let units = self.whole_units(elapsed);
        if units == 0 {
            return false;
        }
        units * self.resolution.as_nanos() >= target.as_nanos()
    }

    /// The default provider for this config: uniform whole units in
    /// `min_cycle..=max_cycle`, seeded from `seed`.
    pub fn random_durations(&self) -> RandomDurations {
        RandomDurations::new(
            CycleRng::new(self.seed),
            self.min_cycle,
            self.max_cycle,
            self.resolution,
        )
    }
}

// ── DurationProvider ──────────────────────────────────────────────────────────

/// Source of cycle durations for a cycling task.
///
/// Moved into the task's thread, hence `Send + 'static`.
pub trait DurationProvider: Send + 'static {
    fn next_duration(&mut self) -> Duration;
}

impl<F> DurationProvider for F
where
    F: FnMut() -> Duration + Send + 'static,
{
    fn next_duration(&mut self) -> Duration {
        self()
    }
}

/// Uniformly random whole multiples of a resolution unit.
pub struct RandomDurations {
    rng:       CycleRng,
    min_units: u64,
    max_units: u64,
    unit_ns:   u128,
}

impl RandomDurations {
    /// `min` and `max` are rounded down to whole `resolution` units; at least
    /// one unit is always drawn.  Unit counts saturate at `u64::MAX`.
    pub fn new(rng: CycleRng, min: Duration, max: Duration, resolution: Duration) -> Self {
        let unit_ns = resolution.as_nanos().max(1);
        let units = |d: Duration| u64::try_from(d.as_nanos() / unit_ns).unwrap_or(u64::MAX);
        let min_units = units(min).max(1);
        let max_units = units(max).max(min_units);
        Self { rng, min_units, max_units, unit_ns }
    }
}

impl DurationProvider for RandomDurations {
    fn next_duration(&mut self) -> Duration {
        let units: u64 = self.rng.gen_range(self.min_units..=self.max_units);
        // At most max(`max`, `resolution`), so it fits a Duration.
        let nanos = units as u128 * self.unit_ns;
        Duration::new(
            (nanos / NANOS_PER_SEC) as u64,
            (nanos % NANOS_PER_SEC) as u32,
        )
    }
}

/// The same duration every time.
#[derive(Clone, Copy, Debug)]
pub struct FixedDuration(pub Duration);

impl DurationProvider for FixedDuration {
    fn next_duration(&mut self) -> Duration {
        self.0
    }
}

/// Cycles through a fixed list of durations, wrapping at the end.
#[derive(Clone, Debug)]
pub struct SequenceDurations {
    durations: Vec<Duration>,
    next:      usize,
}

impl SequenceDurations {
    /// Returns `None` if `durations` is empty.
    pub fn new(durations: Vec<Duration>) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }
        Some(Self { durations, next: 0 })
    }
}

impl DurationProvider for SequenceDurations {
    fn next_duration(&mut self) -> Duration {
        let d = self.durations[self.next];
        self.next = (self.next + 1) % self.durations.len();
        d
    }
}
