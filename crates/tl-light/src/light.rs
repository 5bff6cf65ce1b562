//! The `TrafficLight` agent and its lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tl_core::{AtomicPhase, CycleConfig, DurationProvider, Phase};
use tl_queue::{PhaseQueue, PopOrder};
use tracing::warn;

use crate::cycle::CycleTask;
use crate::{LightError, LightResult, NoopObserver, PhaseObserver, TaskSet};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum State {
    Idle,
    Running,
    ShutDown,
}

struct Lifecycle {
    state:   State,
    /// The cycling task waiting to be started.  `None` once `simulate` ran.
    pending: Option<CycleTask>,
    tasks:   TaskSet,
}

// ── TrafficLight ──────────────────────────────────────────────────────────────

/// A simulated light that alternates red/green on its own thread.
///
/// Share it between threads with an `Arc`: every method takes `&self`.
///
/// | Call                 | Effect                                          |
/// |----------------------|-------------------------------------------------|
/// | `simulate()`         | Start the cycling task (once).                  |
/// | `wait_for_green()`   | Block until a green phase is popped.            |
/// | `current_phase()`    | Lock-free snapshot of the phase.                |
/// | `shutdown()` / drop  | Stop the task and join it.                      |
///
/// Create via [`TrafficLight::new`] or
/// [`TrafficLightBuilder`][crate::TrafficLightBuilder].
pub struct TrafficLight {
    name:      String,
    phase:     Arc<AtomicPhase>,
    queue:     Arc<PhaseQueue<Phase>>,
    stop:      Arc<AtomicBool>,
    lifecycle: Mutex<Lifecycle>,
}

impl TrafficLight {
    /// A red light with the default 4–6 s random cycle, seed 0.
    pub fn new() -> Self {
        let config = CycleConfig::default();
        let durations = Box::new(config.random_durations());
        Self::assemble(
            "traffic-light".to_string(),
            config,
            durations,
            Box::new(NoopObserver),
            PopOrder::Lifo,
        )
    }

    pub(crate) fn assemble(
        name:      String,
        config:    CycleConfig,
        durations: Box<dyn DurationProvider>,
        observer:  Box<dyn PhaseObserver>,
        order:     PopOrder,
    ) -> Self {
        let phase = Arc::new(AtomicPhase::new(Phase::Red));
        let queue = Arc::new(PhaseQueue::with_order(order));
        let stop  = Arc::new(AtomicBool::new(false));

        let task = CycleTask {
            light:     name.clone(),
            config,
            phase:     Arc::clone(&phase),
            queue:     Arc::clone(&queue),
            stop:      Arc::clone(&stop),
            durations,
            observer,
        };

        Self {
            name,
            phase,
            queue,
            stop,
            lifecycle: Mutex::new(Lifecycle {
                state:   State::Idle,
                pending: Some(task),
                tasks:   TaskSet::new(),
            }),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The phase last stored by the cycling task.  Red before `simulate`.
    pub fn current_phase(&self) -> Phase {
        self.phase.load()
    }

    /// Start the cycling task on a background thread and return immediately.
    ///
    /// A light runs at most one cycling task: a second call returns
    /// [`LightError::AlreadyRunning`] and after [`shutdown`](Self::shutdown)
    /// every call returns [`LightError::ShutDown`].
    pub fn simulate(&self) -> LightResult<()> {
        let mut life = self.lock_lifecycle();
        match life.state {
            State::Running => {
                warn!(light = %self.name, "simulate called on a running light");
                return Err(LightError::AlreadyRunning);
            }
            State::ShutDown => return Err(LightError::ShutDown),
            State::Idle => {}
        }

        let Some(task) = life.pending.take() else {
            return Err(LightError::AlreadyRunning);
        };
        // The task is consumed even if the spawn fails, so a failed start
        // leaves the light permanently shut down.
        if let Err(e) = life.tasks.spawn(self.name.clone(), move || task.run()) {
            life.state = State::ShutDown;
            return Err(e);
        }
        life.state = State::Running;
        Ok(())
    }

    /// Block until a green phase comes out of the queue.  Reds are discarded.
    ///
    /// Each iteration parks the thread in the queue; nothing spins.  With no
    /// cycling task and no greens pushed this never returns.
    pub fn wait_for_green(&self) {
        while !self.queue.blocking_pop().is_green() {}
    }

    /// [`wait_for_green`](Self::wait_for_green) with a deadline.
    ///
    /// Returns `true` if a green was popped, `false` if `timeout` passed first.
    pub fn wait_for_green_timeout(&self, timeout: Duration) -> bool {
        // A deadline past what `Instant` can represent is no deadline at all.
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait_for_green();
            return true;
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.queue.pop_timeout(remaining) {
                Some(Phase::Green) => return true,
                Some(Phase::Red)   => continue,
                None               => return false,
            }
        }
    }

    /// The queue phases are published on.
    pub fn queue(&self) -> &Arc<PhaseQueue<Phase>> {
        &self.queue
    }

    pub fn is_running(&self) -> bool {
        self.lock_lifecycle().state == State::Running
    }

    /// Stop the cycling task and join it.  The task exits within one poll
    /// interval.  Safe to call more than once.
    ///
    /// Callers blocked in `wait_for_green` are not woken; a phase pushed
    /// before the stop is still in the queue for them.
    pub fn shutdown(&self) -> LightResult<()> {
        let mut life = self.lock_lifecycle();
        self.stop.store(true, Ordering::Release);
        life.state = State::ShutDown;
        life.pending = None;
        life.tasks.join_all()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(light = %self.name, error = %e, "shutdown on drop failed");
        }
    }
}
