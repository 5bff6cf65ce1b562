//! `tl-light` — a traffic light that cycles on its own thread.
//!
//! # Producer → queue → consumers
//!
//! ```text
//! simulate()
//!   └─ thread "traffic-light":
//!        loop until stop:
//!          elapsed ≥ cycle?  → toggle phase → store (Release) → queue.push
//!          sleep poll_interval
//!
//! wait_for_green()   (any thread)
//!   loop: queue.blocking_pop() → red: discard, green: return
//! ```
//!
//! Each queued phase is delivered to exactly one waiting caller.
//!
//! # Lifecycle
//!
//! `simulate` starts at most one cycling task.  `shutdown` (or dropping the
//! light) raises the stop flag and joins the task through the light's
//! [`TaskSet`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tl_light::TrafficLightBuilder;
//!
//! let light = Arc::new(TrafficLightBuilder::new().seed(7).build()?);
//! light.simulate()?;
//! light.wait_for_green();
//! light.shutdown()?;
//! ```

pub mod builder;
mod cycle;
pub mod error;
pub mod light;
pub mod observer;
pub mod tasks;


pub use builder::TrafficLightBuilder;
pub use error::{LightError, LightResult};
pub use light::TrafficLight;
pub use observer::{NoopObserver, PhaseObserver};
pub use tasks::TaskSet;
