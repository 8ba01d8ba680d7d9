//! Shared execution recorder for scheduler tests.

use std::sync::{Arc, Mutex};

use anyhow::bail;

/// Records which tasks ran, in order, across cloned handles.
///
/// Work closures built from the same log share one underlying vector, so a
/// test can assert on the global execution order of a whole job.
#[derive(Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded names, in execution order.
    pub fn names(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times `name` was recorded.
    pub fn count_of(&self, name: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.as_str() == name)
            .count()
    }

    /// Work that records `name` and succeeds.
    pub fn work(&self, name: &str) -> impl FnMut() -> anyhow::Result<()> + Send + 'static {
        let entries = Arc::clone(&self.entries);
        let name = name.to_string();
        move || {
            entries.lock().unwrap().push(name.clone());
            Ok(())
        }
    }

    /// Work that records `name` and then fails.
    pub fn failing_work(
        &self,
        name: &str,
    ) -> impl FnMut() -> anyhow::Result<()> + Send + 'static {
        let entries = Arc::clone(&self.entries);
        let name = name.to_string();
        move || {
            entries.lock().unwrap().push(name.clone());
            bail!("induced failure in task '{name}'")
        }
    }
}

/// Standalone failing work, for tests that don't care about ordering.
pub fn failing_work(msg: &str) -> impl FnMut() -> anyhow::Result<()> + Send + 'static {
    let msg = msg.to_string();
    move || bail!("{msg}")
}
