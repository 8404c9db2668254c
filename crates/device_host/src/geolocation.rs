//! Geolocation API contracts.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, DeviceFuture, ListenerRegistry, Subscription};

/// Coordinates of one position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Accuracy radius in meters.
    pub accuracy: f64,
}

/// Callback receiving position fixes or acquisition errors from a watch.
pub type PositionListener = Rc<dyn Fn(Result<GeoPosition, String>)>;

/// Host service exposing `navigator.geolocation`.
pub trait GeolocationService {
    /// Reports whether `navigator.geolocation` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Acquires the current position once.
    fn current_position<'a>(&'a self) -> DeviceFuture<'a, Result<GeoPosition, String>>;

    /// Watches position changes; dropping the guard clears the watch.
    fn watch_position(&self, listener: PositionListener) -> Subscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Geolocation service for hosts without `navigator.geolocation`.
pub struct NoopGeolocationService;

impl GeolocationService for NoopGeolocationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn current_position<'a>(&'a self) -> DeviceFuture<'a, Result<GeoPosition, String>> {
        Box::pin(async { Err("geolocation is unavailable".to_string()) })
    }

    fn watch_position(&self, _listener: PositionListener) -> Subscription {
        Subscription::detached()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory position provider.
pub struct MemoryGeolocationService {
    fix: Rc<RefCell<Option<Result<GeoPosition, String>>>>,
    watchers: ListenerRegistry<Result<GeoPosition, String>>,
}

impl MemoryGeolocationService {
    /// Sets the answer to subsequent position requests.
    pub fn set_fix(&self, fix: Result<GeoPosition, String>) {
        *self.fix.borrow_mut() = Some(fix);
    }

    /// Pushes a fix to every active watch.
    pub fn push(&self, fix: Result<GeoPosition, String>) {
        self.watchers.emit(fix);
    }

    /// Number of active watches.
    pub fn watch_count(&self) -> usize {
        self.watchers.len()
    }
}

impl GeolocationService for MemoryGeolocationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn current_position<'a>(&'a self) -> DeviceFuture<'a, Result<GeoPosition, String>> {
        Box::pin(async move {
            self.fix
                .borrow()
                .clone()
                .unwrap_or_else(|| Err("position unavailable".to_string()))
        })
    }

    fn watch_position(&self, listener: PositionListener) -> Subscription {
        self.watchers.add(listener)
    }
}
