//! Local task spawning seam.

use std::{future::Future, pin::Pin};

use futures::{executor::LocalSpawner, task::LocalSpawnExt};
use leptos::logging;

/// A `!Send` unit task.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs local tasks on the current thread.
pub trait TaskSpawner {
    /// Schedules `task`.
    fn spawn(&self, task: LocalTask);
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner backed by the Leptos/wasm microtask queue.
pub struct BrowserSpawner;

impl TaskSpawner for BrowserSpawner {
    fn spawn(&self, task: LocalTask) {
        leptos::spawn_local(task);
    }
}

impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: LocalTask) {
        if let Err(err) = self.spawn_local(task) {
            logging::warn!("local task spawn failed: {err}");
        }
    }
}
