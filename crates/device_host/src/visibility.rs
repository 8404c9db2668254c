//! Page Visibility API contracts.

use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, ListenerRegistry, Subscription};

/// `document.visibilityState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityState {
    /// Page content is at least partially visible.
    Visible,
    /// Page content is not visible (background tab, minimized window).
    Hidden,
}

impl VisibilityState {
    /// Parses the DOM token; anything other than `hidden` counts as visible.
    pub fn from_token(token: &str) -> Self {
        if token == "hidden" {
            Self::Hidden
        } else {
            Self::Visible
        }
    }

    /// DOM token for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

/// Host service exposing the document visibility flag.
pub trait PageVisibilityService {
    /// Reports whether `document.visibilityState` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Current visibility.
    fn state(&self) -> VisibilityState;

    /// Listens to `visibilitychange`.
    fn on_change(&self, listener: Rc<dyn Fn(VisibilityState)>) -> Subscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Visibility service for hosts without a document.
pub struct NoopPageVisibilityService;

impl PageVisibilityService for NoopPageVisibilityService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn state(&self) -> VisibilityState {
        VisibilityState::Visible
    }

    fn on_change(&self, _listener: Rc<dyn Fn(VisibilityState)>) -> Subscription {
        Subscription::detached()
    }
}

#[derive(Debug, Clone)]
/// In-memory visibility flag.
pub struct MemoryPageVisibilityService {
    state: Rc<Cell<VisibilityState>>,
    listeners: ListenerRegistry<VisibilityState>,
}

impl Default for MemoryPageVisibilityService {
    fn default() -> Self {
        Self {
            state: Rc::new(Cell::new(VisibilityState::Visible)),
            listeners: ListenerRegistry::default(),
        }
    }
}

impl MemoryPageVisibilityService {
    /// Changes visibility and fires `visibilitychange`.
    pub fn set(&self, state: VisibilityState) {
        self.state.set(state);
        self.listeners.emit(state);
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PageVisibilityService for MemoryPageVisibilityService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn state(&self) -> VisibilityState {
        self.state.get()
    }

    fn on_change(&self, listener: Rc<dyn Fn(VisibilityState)>) -> Subscription {
        self.listeners.add(listener)
    }
}
