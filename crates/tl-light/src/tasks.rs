//! Owned collection of background threads.

use std::thread::{self, JoinHandle};

use tracing::warn;

use crate::{LightError, LightResult};

/// Named thread handles owned by a light, joined explicitly on shutdown.
#[derive(Default)]
pub struct TaskSet {
    handles: Vec<(String, JoinHandle<()>)>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `f` on a new thread called `name` and keep its handle.
    pub fn spawn<F>(&mut self, name: impl Into<String>, f: F) -> LightResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let name = name.into();
        let handle = thread::Builder::new().name(name.clone()).spawn(f)?;
        self.handles.push((name, handle));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Join every task.  All handles are joined even if one panicked; the
    /// first panic is reported.
    pub fn join_all(&mut self) -> LightResult<()> {
        let mut first_panic = None;
        for (name, handle) in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!(task = %name, "background task panicked");
                first_panic.get_or_insert(LightError::TaskPanicked(name));
            }
        }
        match first_panic {
            Some(e) => Err(e),
            None    => Ok(()),
        }
    }
}
