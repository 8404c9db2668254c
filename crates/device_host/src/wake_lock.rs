//! Screen Wake Lock API contracts.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::channel::oneshot;

use crate::{CapabilityStatus, DeviceFuture};

/// Held wake lock (`WakeLockSentinel`).
///
/// Browser sentinels release the lock when dropped without an explicit release.
pub trait WakeLockSentinel {
    /// Releases the lock.
    fn release<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>>;

    /// Returns whether the lock has been released.
    fn is_released(&self) -> bool;
}

/// Host service exposing `navigator.wakeLock`.
pub trait WakeLockService {
    /// Reports whether `navigator.wakeLock` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Requests a `screen` wake lock.
    ///
    /// A lock granted after the returned future was dropped is released by the service.
    fn request_screen<'a>(&'a self) -> DeviceFuture<'a, Result<Box<dyn WakeLockSentinel>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Wake lock service for hosts without `navigator.wakeLock`.
pub struct NoopWakeLockService;

impl WakeLockService for NoopWakeLockService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn request_screen<'a>(&'a self) -> DeviceFuture<'a, Result<Box<dyn WakeLockSentinel>, String>> {
        Box::pin(async { Err("screen wake lock is unavailable".to_string()) })
    }
}

#[derive(Debug)]
struct MemorySentinel {
    released: Cell<bool>,
    held: Rc<Cell<usize>>,
}

impl MemorySentinel {
    fn mark_released(&self) {
        if !self.released.replace(true) {
            self.held.set(self.held.get().saturating_sub(1));
        }
    }
}

impl WakeLockSentinel for MemorySentinel {
    fn release<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.mark_released();
            Ok(())
        })
    }

    fn is_released(&self) -> bool {
        self.released.get()
    }
}

impl Drop for MemorySentinel {
    fn drop(&mut self) {
        self.mark_released();
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory wake lock manager counting held locks.
///
/// In deferred mode a request stays pending until [`MemoryWakeLockService::release_pending`],
/// and the lock is acquired only then.
pub struct MemoryWakeLockService {
    held: Rc<Cell<usize>>,
    acquired: Rc<Cell<usize>>,
    failure: Rc<RefCell<Option<String>>>,
    deferred: Rc<Cell<bool>>,
    pending: Rc<RefCell<Vec<oneshot::Sender<MemorySentinel>>>>,
}

impl MemoryWakeLockService {
    /// Keeps future requests pending until released.
    pub fn deferred(self) -> Self {
        self.deferred.set(true);
        self
    }

    /// Grants every pending request. Locks whose requester is gone are released at once.
    pub fn release_pending(&self) {
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for sender in pending {
            // A refused send hands the sentinel back; dropping it releases the lock.
            let _ = sender.send(self.acquire());
        }
    }

    /// Makes subsequent requests reject with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    /// Number of locks currently held.
    pub fn held_count(&self) -> usize {
        self.held.get()
    }

    /// Number of locks granted so far.
    pub fn acquired_count(&self) -> usize {
        self.acquired.get()
    }

    fn acquire(&self) -> MemorySentinel {
        self.held.set(self.held.get() + 1);
        self.acquired.set(self.acquired.get() + 1);
        MemorySentinel {
            released: Cell::new(false),
            held: Rc::clone(&self.held),
        }
    }
}

impl WakeLockService for MemoryWakeLockService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn request_screen<'a>(&'a self) -> DeviceFuture<'a, Result<Box<dyn WakeLockSentinel>, String>> {
        if let Some(message) = self.failure.borrow().clone() {
            return Box::pin(async move { Err(message) });
        }
        if !self.deferred.get() {
            let sentinel = self.acquire();
            return Box::pin(async move { Ok(Box::new(sentinel) as Box<dyn WakeLockSentinel>) });
        }

        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().push(sender);
        Box::pin(async move {
            let sentinel = receiver
                .await
                .map_err(|_| "wake lock request dropped".to_string())?;
            Ok(Box::new(sentinel) as Box<dyn WakeLockSentinel>)
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn dropping_the_sentinel_releases_the_lock() {
        let service = MemoryWakeLockService::default();
        let sentinel = block_on(service.request_screen()).expect("lock");
        assert_eq!(service.held_count(), 1);
        drop(sentinel);
        assert_eq!(service.held_count(), 0);
    }

    #[test]
    fn lock_granted_after_the_request_was_dropped_is_released() {
        let service = MemoryWakeLockService::default().deferred();
        let request = service.request_screen();
        drop(request);

        service.release_pending();
        assert_eq!(service.acquired_count(), 1);
        assert_eq!(service.held_count(), 0);
    }
}
