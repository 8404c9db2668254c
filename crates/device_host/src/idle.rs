//! Idle Detection API contracts.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, DeviceFuture, ListenerRegistry, Subscription};

/// User and screen idle state reported by an idle detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleState {
    /// `active` or `idle`.
    pub user: String,
    /// `locked` or `unlocked`.
    pub screen: String,
}

impl IdleState {
    /// Convenience constructor.
    pub fn new(user: impl Into<String>, screen: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            screen: screen.into(),
        }
    }
}

/// One `IdleDetector` instance.
pub trait IdleDetector {
    /// Listens to the detector `change` event.
    fn on_change(&self, listener: Rc<dyn Fn(IdleState)>) -> Subscription;

    /// Starts observing with the given inactivity threshold.
    fn start<'a>(&'a self, threshold_ms: u32) -> DeviceFuture<'a, Result<(), String>>;
}

/// Host service exposing the `IdleDetector` constructor.
pub trait IdleDetectionService {
    /// Reports whether `IdleDetector` exists on the window.
    fn probe(&self) -> CapabilityStatus;

    /// Requests idle-detection permission and resolves with the permission token.
    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, Result<String, String>>;

    /// Constructs a new detector.
    fn create_detector(&self) -> Result<Rc<dyn IdleDetector>, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Idle detection service for hosts without `IdleDetector`.
pub struct NoopIdleDetectionService;

impl IdleDetectionService for NoopIdleDetectionService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, Result<String, String>> {
        Box::pin(async { Err("idle detection is unavailable".to_string()) })
    }

    fn create_detector(&self) -> Result<Rc<dyn IdleDetector>, String> {
        Err("idle detection is unavailable".to_string())
    }
}

#[derive(Debug)]
struct MemoryIdleDetector {
    listeners: ListenerRegistry<IdleState>,
    started_with: Rc<RefCell<Vec<u32>>>,
    failure: Option<String>,
}

impl IdleDetector for MemoryIdleDetector {
    fn on_change(&self, listener: Rc<dyn Fn(IdleState)>) -> Subscription {
        self.listeners.add(listener)
    }

    fn start<'a>(&'a self, threshold_ms: u32) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(message) = self.failure.clone() {
                return Err(message);
            }
            self.started_with.borrow_mut().push(threshold_ms);
            Ok(())
        })
    }
}

#[derive(Debug, Clone)]
/// In-memory idle detection host. All detectors share one listener list.
pub struct MemoryIdleDetectionService {
    permission: Rc<RefCell<String>>,
    listeners: ListenerRegistry<IdleState>,
    started_with: Rc<RefCell<Vec<u32>>>,
    created: Rc<Cell<usize>>,
    failure: Rc<RefCell<Option<String>>>,
}

impl Default for MemoryIdleDetectionService {
    fn default() -> Self {
        Self {
            permission: Rc::new(RefCell::new("granted".to_string())),
            listeners: ListenerRegistry::default(),
            started_with: Rc::default(),
            created: Rc::default(),
            failure: Rc::default(),
        }
    }
}

impl MemoryIdleDetectionService {
    /// Sets the token returned by permission requests.
    pub fn set_permission(&self, permission: impl Into<String>) {
        *self.permission.borrow_mut() = permission.into();
    }

    /// Makes subsequently created detectors fail to start.
    pub fn fail_start_with(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    /// Lets subsequently created detectors start again.
    pub fn clear_start_failure(&self) {
        self.failure.borrow_mut().take();
    }

    /// Fires `change` on every detector.
    pub fn emit(&self, state: IdleState) {
        self.listeners.emit(state);
    }

    /// Thresholds passed to `start`, oldest first.
    pub fn started_with(&self) -> Vec<u32> {
        self.started_with.borrow().clone()
    }

    /// Number of detectors constructed.
    pub fn created_count(&self) -> usize {
        self.created.get()
    }

    /// Number of attached `change` listeners across detectors.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl IdleDetectionService for MemoryIdleDetectionService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, Result<String, String>> {
        Box::pin(async move { Ok(self.permission.borrow().clone()) })
    }

    fn create_detector(&self) -> Result<Rc<dyn IdleDetector>, String> {
        self.created.set(self.created.get() + 1);
        Ok(Rc::new(MemoryIdleDetector {
            listeners: self.listeners.clone(),
            started_with: Rc::clone(&self.started_with),
            failure: self.failure.borrow().clone(),
        }))
    }
}
