//! Screen Orientation API contracts.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, DeviceFuture};

/// Orientation accepted by [`ScreenOrientationService::lock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationLock {
    /// Any portrait orientation.
    Portrait,
    /// Any landscape orientation.
    Landscape,
}

impl OrientationLock {
    /// Token passed to `screen.orientation.lock`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    const fn primary_type(self) -> &'static str {
        match self {
            Self::Portrait => "portrait-primary",
            Self::Landscape => "landscape-primary",
        }
    }
}

/// Host service exposing `screen.orientation`.
pub trait ScreenOrientationService {
    /// Reports whether `screen.orientation` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Current orientation type, e.g. `portrait-primary`.
    fn orientation_type(&self) -> String;

    /// Locks the document to `orientation`.
    fn lock<'a>(&'a self, orientation: OrientationLock) -> DeviceFuture<'a, Result<(), String>>;

    /// Removes any orientation lock.
    fn unlock(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Orientation service for hosts without `screen.orientation`.
pub struct NoopScreenOrientationService;

impl ScreenOrientationService for NoopScreenOrientationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn orientation_type(&self) -> String {
        String::new()
    }

    fn lock<'a>(&'a self, _orientation: OrientationLock) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("screen orientation is unavailable".to_string()) })
    }

    fn unlock(&self) {}
}

#[derive(Debug, Default)]
struct OrientationState {
    current: String,
    locked: Option<OrientationLock>,
    failure: Option<String>,
    unlocks: usize,
}

#[derive(Debug, Clone)]
/// In-memory orientation controller.
pub struct MemoryScreenOrientationService {
    state: Rc<RefCell<OrientationState>>,
}

impl Default for MemoryScreenOrientationService {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(OrientationState {
                current: "portrait-primary".to_string(),
                ..OrientationState::default()
            })),
        }
    }
}

impl MemoryScreenOrientationService {
    /// Makes subsequent locks reject with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state.borrow_mut().failure = Some(message.into());
    }

    /// Currently held lock.
    pub fn locked(&self) -> Option<OrientationLock> {
        self.state.borrow().locked
    }

    /// Number of `unlock` calls.
    pub fn unlock_count(&self) -> usize {
        self.state.borrow().unlocks
    }
}

impl ScreenOrientationService for MemoryScreenOrientationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn orientation_type(&self) -> String {
        self.state.borrow().current.clone()
    }

    fn lock<'a>(&'a self, orientation: OrientationLock) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.state.borrow_mut();
            if let Some(message) = state.failure.clone() {
                return Err(message);
            }
            state.locked = Some(orientation);
            state.current = orientation.primary_type().to_string();
            Ok(())
        })
    }

    fn unlock(&self) {
        let mut state = self.state.borrow_mut();
        state.locked = None;
        state.unlocks += 1;
    }
}
