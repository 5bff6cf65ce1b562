//! The cycling task: polls the clock and flips the phase when a cycle runs out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use tl_core::{AtomicPhase, CycleConfig, DurationProvider, Phase};
use tl_queue::PhaseQueue;
use tracing::{debug, info};

use crate::PhaseObserver;

/// Everything the background thread needs, assembled at build time and
/// moved into the thread by `simulate()`.
pub(crate) struct CycleTask {
    pub(crate) light:     String,
    pub(crate) config:    CycleConfig,
    pub(crate) phase:     Arc<AtomicPhase>,
    pub(crate) queue:     Arc<PhaseQueue<Phase>>,
    pub(crate) stop:      Arc<AtomicBool>,
    pub(crate) durations: Box<dyn DurationProvider>,
    pub(crate) observer:  Box<dyn PhaseObserver>,
}

impl CycleTask {
    /// Loop until the stop flag is raised.
    ///
    /// Each iteration: check stop → measure elapsed → flip if due → sleep
    /// `poll_interval`.  A flip stores the new phase before pushing it, so a
    /// caller released by `wait_for_green` reads green from the light.
    pub(crate) fn run(mut self) {
        let mut target = self.durations.next_duration();
        self.observer.on_cycle_start(target);
        info!(light = %self.light, cycle = ?target, "cycling task started");

        let mut last_flip = Instant::now();
        let mut cycles: u64 = 0;

        while !self.stop.load(Ordering::Acquire) {
            if self.config.flip_due(last_flip.elapsed(), target) {
                last_flip = Instant::now();
                let phase = self.phase.load().toggled();
                self.phase.store(phase);
                self.queue.push(phase);
                cycles += 1;
                debug!(light = %self.light, %phase, cycle = cycles, "phase changed");
                self.observer.on_phase_change(phase, cycles);

                if self.config.redraw_each_cycle {
                    target = self.durations.next_duration();
                    self.observer.on_cycle_start(target);
                }
            }
            thread::sleep(self.config.poll_interval);
        }

        info!(light = %self.light, cycles, "cycling task stopped");
        self.observer.on_stop(cycles);
    }
}
