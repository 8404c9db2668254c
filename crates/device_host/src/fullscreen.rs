//! Fullscreen API contracts.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{CapabilityStatus, DeviceFuture};

/// Host service for entering and leaving fullscreen mode on the document element.
pub trait FullscreenService {
    /// Reports whether `fullscreenElement`/`exitFullscreen` exist and fullscreen is enabled.
    fn probe(&self) -> CapabilityStatus;

    /// Returns whether an element is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Requests fullscreen for the document element.
    fn request_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>>;

    /// Leaves fullscreen mode.
    fn exit_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Fullscreen service for hosts without the Fullscreen API.
pub struct NoopFullscreenService;

impl FullscreenService for NoopFullscreenService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn is_fullscreen(&self) -> bool {
        false
    }

    fn request_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("fullscreen is unavailable".to_string()) })
    }

    fn exit_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("fullscreen is unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory fullscreen toggle that records requests.
pub struct MemoryFullscreenService {
    fullscreen: Rc<Cell<bool>>,
    requests: Rc<Cell<usize>>,
    exits: Rc<Cell<usize>>,
    failure: Rc<RefCell<Option<String>>>,
}

impl MemoryFullscreenService {
    /// Makes subsequent requests reject with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    /// Number of `request_fullscreen` calls.
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    /// Number of `exit_fullscreen` calls.
    pub fn exit_count(&self) -> usize {
        self.exits.get()
    }

    fn transition(&self, to: bool) -> Result<(), String> {
        if let Some(message) = self.failure.borrow().clone() {
            return Err(message);
        }
        self.fullscreen.set(to);
        Ok(())
    }
}

impl FullscreenService for MemoryFullscreenService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn request_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        self.requests.set(self.requests.get() + 1);
        Box::pin(async move { self.transition(true) })
    }

    fn exit_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        self.exits.set(self.exits.get() + 1);
        Box::pin(async move { self.transition(false) })
    }
}
