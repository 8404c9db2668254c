//! Badging API contracts.

use std::{cell::RefCell, rc::Rc};

use crate::{CapabilityStatus, DeviceFuture};

/// Host service for the application icon badge.
pub trait BadgeService {
    /// Reports whether `setAppBadge` or `setClientBadge` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Sets the badge to `count`.
    fn set_app_badge<'a>(&'a self, count: u32) -> DeviceFuture<'a, Result<(), String>>;

    /// Clears the badge.
    fn clear_app_badge<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Badge service for hosts without the Badging API.
pub struct NoopBadgeService;

impl BadgeService for NoopBadgeService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn set_app_badge<'a>(&'a self, _count: u32) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("badging is unavailable".to_string()) })
    }

    fn clear_app_badge<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("badging is unavailable".to_string()) })
    }
}

#[derive(Debug, Default)]
struct BadgeState {
    badge: Option<u32>,
    calls: Vec<Option<u32>>,
    failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory badge holder.
pub struct MemoryBadgeService {
    state: Rc<RefCell<BadgeState>>,
}

impl MemoryBadgeService {
    /// Current badge value.
    pub fn badge(&self) -> Option<u32> {
        self.state.borrow().badge
    }

    /// Every set (`Some`) and clear (`None`) call, oldest first.
    pub fn calls(&self) -> Vec<Option<u32>> {
        self.state.borrow().calls.clone()
    }

    /// Makes subsequent calls reject with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state.borrow_mut().failure = Some(message.into());
    }

    fn apply(&self, badge: Option<u32>) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        state.calls.push(badge);
        if let Some(message) = state.failure.clone() {
            return Err(message);
        }
        state.badge = badge;
        Ok(())
    }
}

impl BadgeService for MemoryBadgeService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn set_app_badge<'a>(&'a self, count: u32) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move { self.apply(Some(count)) })
    }

    fn clear_app_badge<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move { self.apply(None) })
    }
}
