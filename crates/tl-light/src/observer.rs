//! Observer trait for phase-change reporting.

use std::time::Duration;

use tl_core::Phase;

/// Callbacks invoked by the cycling task at key points in its loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  The observer is moved into the task's
/// thread on `simulate()`, and every call happens on that thread.
///
/// # Example — flip counter
///
/// ```rust,ignore
/// struct FlipLog { flips: Arc<AtomicU64> }
///
/// impl PhaseObserver for FlipLog {
///     fn on_phase_change(&mut self, _phase: Phase, _cycle: u64) {
///         self.flips.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait PhaseObserver: Send + 'static {
    /// Called whenever the task picks a new cycle duration: once at start,
    /// and after every flip when `redraw_each_cycle` is set.
    fn on_cycle_start(&mut self, _duration: Duration) {}

    /// Called after the new phase is stored and pushed into the queue.
    ///
    /// `cycle` counts flips since the task started, starting at 1.
    fn on_phase_change(&mut self, _phase: Phase, _cycle: u64) {}

    /// Called once when the task leaves its loop after a stop request.
    fn on_stop(&mut self, _cycles: u64) {}
}

/// A [`PhaseObserver`] that does nothing.
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {}
