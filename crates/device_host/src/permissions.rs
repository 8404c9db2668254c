//! Permissions API contracts.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, DeviceFuture, ListenerRegistry, Subscription};

/// Permission names offered by the permissions demo, in display order.
pub const KNOWN_PERMISSION_NAMES: [&str; 26] = [
    "geolocation",
    "notifications",
    "push",
    "midi",
    "camera",
    "microphone",
    "background-fetch",
    "background-sync",
    "persistent-storage",
    "ambient-light-sensor",
    "accelerometer",
    "gyroscope",
    "magnetometer",
    "screen-wake-lock",
    "nfc",
    "display-capture",
    "accessibility-events",
    "clipboard-read",
    "clipboard-write",
    "payment-handler",
    "idle-detection",
    "periodic-background-sync",
    "system-wake-lock",
    "storage-access",
    "window-placement",
    "local-fonts",
];

/// `PermissionStatus.state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionState {
    /// Access is allowed.
    Granted,
    /// Access is blocked.
    Denied,
    /// The user will be asked.
    Prompt,
}

impl PermissionState {
    /// Parses the DOM token; unknown tokens map to [`PermissionState::Prompt`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Prompt,
        }
    }

    /// DOM token for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "prompt",
        }
    }
}

/// Live `PermissionStatus` object.
pub trait PermissionStatus {
    /// Permission name reported by the browser, when it reports one.
    fn name(&self) -> Option<String>;

    /// Current state.
    fn state(&self) -> PermissionState;

    /// Listens to the status `change` event.
    fn on_change(&self, listener: Rc<dyn Fn(PermissionState)>) -> Subscription;
}

/// Host service exposing `navigator.permissions`.
pub trait PermissionsService {
    /// Reports whether `navigator.permissions` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Queries one permission by name.
    fn query<'a>(
        &'a self,
        name: &'a str,
    ) -> DeviceFuture<'a, Result<Rc<dyn PermissionStatus>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Permissions service for hosts without `navigator.permissions`.
pub struct NoopPermissionsService;

impl PermissionsService for NoopPermissionsService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn query<'a>(
        &'a self,
        _name: &'a str,
    ) -> DeviceFuture<'a, Result<Rc<dyn PermissionStatus>, String>> {
        Box::pin(async { Err("permissions are unavailable".to_string()) })
    }
}

#[derive(Debug)]
struct MemoryPermission {
    name: String,
    state: Cell<PermissionState>,
    listeners: ListenerRegistry<PermissionState>,
}

impl PermissionStatus for MemoryPermission {
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn state(&self) -> PermissionState {
        self.state.get()
    }

    fn on_change(&self, listener: Rc<dyn Fn(PermissionState)>) -> Subscription {
        self.listeners.add(listener)
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory permission table. Names not in the table reject their query.
pub struct MemoryPermissionsService {
    table: Rc<RefCell<HashMap<String, Rc<MemoryPermission>>>>,
}

impl MemoryPermissionsService {
    /// Adds or replaces a permission with the given state.
    pub fn insert(&self, name: &str, state: PermissionState) {
        self.table.borrow_mut().insert(
            name.to_string(),
            Rc::new(MemoryPermission {
                name: name.to_string(),
                state: Cell::new(state),
                listeners: ListenerRegistry::default(),
            }),
        );
    }

    /// Changes a permission state and fires `change` on its status object.
    pub fn set_state(&self, name: &str, state: PermissionState) {
        let permission = self.table.borrow().get(name).cloned();
        if let Some(permission) = permission {
            permission.state.set(state);
            permission.listeners.emit(state);
        }
    }

    /// Number of `change` listeners attached to `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.table
            .borrow()
            .get(name)
            .map_or(0, |permission| permission.listeners.len())
    }
}

impl PermissionsService for MemoryPermissionsService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn query<'a>(
        &'a self,
        name: &'a str,
    ) -> DeviceFuture<'a, Result<Rc<dyn PermissionStatus>, String>> {
        Box::pin(async move {
            self.table
                .borrow()
                .get(name)
                .cloned()
                .map(|permission| permission as Rc<dyn PermissionStatus>)
                .ok_or_else(|| format!("TypeError: '{name}' is not a valid permission name"))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_permissions_query_and_change() {
        let service = MemoryPermissionsService::default();
        service.insert("camera", PermissionState::Prompt);

        let status = block_on(service.query("camera")).expect("query camera");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription =
            status.on_change(Rc::new(move |state| sink.borrow_mut().push(state)));

        service.set_state("camera", PermissionState::Granted);
        assert_eq!(status.state(), PermissionState::Granted);
        assert_eq!(*seen.borrow(), vec![PermissionState::Granted]);
        assert_eq!(service.listener_count("camera"), 1);

        drop(subscription);
        assert_eq!(service.listener_count("camera"), 0);
    }

    #[test]
    fn unknown_permission_rejects() {
        let service = MemoryPermissionsService::default();
        assert!(block_on(service.query("telepathy")).is_err());
    }

    #[test]
    fn known_names_are_unique() {
        let mut names = KNOWN_PERMISSION_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), KNOWN_PERMISSION_NAMES.len());
    }
}
