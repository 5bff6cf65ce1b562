//! Fluent builder for constructing a [`TrafficLight`].

use tl_core::{CycleConfig, DurationProvider};
use tl_queue::PopOrder;

use crate::{LightResult, NoopObserver, PhaseObserver, TrafficLight};

/// Fluent builder for [`TrafficLight`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                      |
/// |---------------------|----------------------------------------------|
/// | `.name(s)`          | `"traffic-light"` (also the thread name)     |
/// | `.config(c)`        | `CycleConfig::default()`                     |
/// | `.seed(n)`          | `config.seed`                                |
/// | `.durations(p)`     | `config.random_durations()` (4–6 s)          |
/// | `.observer(o)`      | `NoopObserver`                               |
/// | `.queue_order(o)`   | `PopOrder::Lifo`                             |
///
/// # Example
///
/// ```rust,ignore
/// let light = TrafficLightBuilder::new()
///     .name("main-and-5th")
///     .durations(FixedDuration(Duration::from_secs(5)))
///     .build()?;
/// light.simulate()?;
/// light.wait_for_green();
/// ```
pub struct TrafficLightBuilder {
    name:      String,
    config:    CycleConfig,
    durations: Option<Box<dyn DurationProvider>>,
    observer:  Option<Box<dyn PhaseObserver>>,
    order:     PopOrder,
}

impl TrafficLightBuilder {
    pub fn new() -> Self {
        Self {
            name:      "traffic-light".to_string(),
            config:    CycleConfig::default(),
            durations: None,
            observer:  None,
            order:     PopOrder::Lifo,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(mut self, config: CycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for the default random duration provider.  Ignored when
    /// `.durations(..)` supplies a provider.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replace the random 4–6 s draw with another duration source.
    pub fn durations(mut self, provider: impl DurationProvider) -> Self {
        self.durations = Some(Box::new(provider));
        self
    }

    pub fn observer(mut self, observer: impl PhaseObserver) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn queue_order(mut self, order: PopOrder) -> Self {
        self.order = order;
        self
    }

    /// Validate the config and return an idle, red light.
    pub fn build(self) -> LightResult<TrafficLight> {
        self.config.validate()?;

        let durations: Box<dyn DurationProvider> = match self.durations {
            Some(p) => p,
            None    => Box::new(self.config.random_durations()),
        };
        let observer: Box<dyn PhaseObserver> = match self.observer {
            Some(o) => o,
            None    => Box::new(NoopObserver),
        };

        Ok(TrafficLight::assemble(
            self.name,
            self.config,
            durations,
            observer,
            self.order,
        ))
    }
}

impl Default for TrafficLightBuilder {
    fn default() -> Self {
        Self::new()
    }
}
