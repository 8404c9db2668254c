//! Service worker registration contracts.

use std::{cell::RefCell, rc::Rc};

use crate::{CapabilityStatus, DeviceFuture};

/// Host service registering the background install/update worker.
pub trait ServiceWorkerService {
    /// Reports whether `navigator.serviceWorker` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Registers `script_url` for `scope`.
    fn register<'a>(
        &'a self,
        script_url: &'a str,
        scope: &'a str,
    ) -> DeviceFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Service worker host for environments without service workers.
pub struct NoopServiceWorkerService;

impl ServiceWorkerService for NoopServiceWorkerService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn register<'a>(
        &'a self,
        _script_url: &'a str,
        _scope: &'a str,
    ) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async { Err("service workers are unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory registrar recording `(script_url, scope)` pairs.
pub struct MemoryServiceWorkerService {
    registrations: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryServiceWorkerService {
    /// Registrations made so far.
    pub fn registrations(&self) -> Vec<(String, String)> {
        self.registrations.borrow().clone()
    }
}

impl ServiceWorkerService for MemoryServiceWorkerService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn register<'a>(
        &'a self,
        script_url: &'a str,
        scope: &'a str,
    ) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.registrations
                .borrow_mut()
                .push((script_url.to_string(), scope.to_string()));
            Ok(())
        })
    }
}
