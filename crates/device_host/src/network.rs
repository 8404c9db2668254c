//! Network Information API contracts (`navigator.connection`).

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, ListenerRegistry, Subscription};

/// Connection attributes reported by `navigator.connection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Physical connection type (`wifi`, `cellular`, ...).
    pub kind: Option<String>,
    /// Effective cellular type (`4g`, `3g`, ...).
    pub effective_type: Option<String>,
    /// Estimated bandwidth in Mbps.
    pub downlink: Option<f64>,
    /// Maximum downlink in Mbps for the underlying technology.
    pub downlink_max: Option<f64>,
}

/// Host service exposing the network connection object.
pub trait NetworkInfoService {
    /// Reports whether `navigator.connection` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Reads the current connection attributes.
    fn connection(&self) -> ConnectionInfo;

    /// Listens to the connection `change` event.
    fn on_change(&self, listener: Rc<dyn Fn()>) -> Subscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Network information service for hosts without `navigator.connection`.
pub struct NoopNetworkInfoService;

impl NetworkInfoService for NoopNetworkInfoService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn connection(&self) -> ConnectionInfo {
        ConnectionInfo::default()
    }

    fn on_change(&self, _listener: Rc<dyn Fn()>) -> Subscription {
        Subscription::detached()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory connection object with a settable state.
pub struct MemoryNetworkInfoService {
    info: Rc<RefCell<ConnectionInfo>>,
    listeners: ListenerRegistry<()>,
}

impl MemoryNetworkInfoService {
    /// Creates a service reporting `info`.
    pub fn new(info: ConnectionInfo) -> Self {
        let service = Self::default();
        *service.info.borrow_mut() = info;
        service
    }

    /// Replaces the connection state and fires `change`.
    pub fn update(&self, info: ConnectionInfo) {
        *self.info.borrow_mut() = info;
        self.listeners.emit(());
    }

    /// Number of attached `change` listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl NetworkInfoService for MemoryNetworkInfoService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn connection(&self) -> ConnectionInfo {
        self.info.borrow().clone()
    }

    fn on_change(&self, listener: Rc<dyn Fn()>) -> Subscription {
        self.listeners.add(Rc::new(move |()| listener()))
    }
}
