//! Battery Status API contracts.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

use crate::{CapabilityStatus, DeviceFuture, ListenerRegistry, Subscription};

/// Snapshot of the system battery as reported by the battery manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Whether the battery is currently charging.
    pub charging: bool,
    /// Charge level between `0.0` and `1.0`.
    pub level: f64,
    /// Seconds until fully charged (`f64::INFINITY` when not charging).
    pub charging_time: f64,
    /// Seconds until empty (`f64::INFINITY` when charging).
    pub discharging_time: f64,
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self {
            charging: true,
            level: 1.0,
            charging_time: 0.0,
            discharging_time: f64::INFINITY,
        }
    }
}

/// Battery manager event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryChange {
    /// `chargingchange`
    Charging,
    /// `levelchange`
    Level,
    /// `chargingtimechange`
    ChargingTime,
    /// `dischargingtimechange`
    DischargingTime,
}

impl BatteryChange {
    /// Every battery event, in registration order.
    pub const ALL: [Self; 4] = [
        Self::Charging,
        Self::Level,
        Self::ChargingTime,
        Self::DischargingTime,
    ];

    /// DOM event name for this change.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Charging => "chargingchange",
            Self::Level => "levelchange",
            Self::ChargingTime => "chargingtimechange",
            Self::DischargingTime => "dischargingtimechange",
        }
    }
}

/// Live battery manager object resolved by [`BatteryService::get_battery`].
pub trait BatteryManager {
    /// Reads the current battery state.
    fn status(&self) -> BatteryStatus;

    /// Listens to all four battery change events.
    fn on_change(&self, listener: Rc<dyn Fn(BatteryChange)>) -> Subscription;
}

/// Host service exposing `navigator.getBattery()`.
pub trait BatteryService {
    /// Reports whether `getBattery` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Resolves the battery manager.
    fn get_battery<'a>(&'a self) -> DeviceFuture<'a, Result<Rc<dyn BatteryManager>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Battery service for hosts without the Battery Status API.
pub struct NoopBatteryService;

impl BatteryService for NoopBatteryService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn get_battery<'a>(&'a self) -> DeviceFuture<'a, Result<Rc<dyn BatteryManager>, String>> {
        Box::pin(async { Err("battery status is unavailable".to_string()) })
    }
}

#[derive(Debug, Default)]
struct MemoryBatteryManager {
    status: RefCell<BatteryStatus>,
    listeners: ListenerRegistry<BatteryChange>,
}

impl BatteryManager for MemoryBatteryManager {
    fn status(&self) -> BatteryStatus {
        *self.status.borrow()
    }

    /// Registers one listener per event kind, as the browser manager does.
    fn on_change(&self, listener: Rc<dyn Fn(BatteryChange)>) -> Subscription {
        let registrations: Vec<Subscription> = BatteryChange::ALL
            .into_iter()
            .map(|kind| {
                let listener = Rc::clone(&listener);
                self.listeners.add(Rc::new(move |change: BatteryChange| {
                    if change == kind {
                        listener(change);
                    }
                }))
            })
            .collect();
        Subscription::new(move || drop(registrations))
    }
}

#[derive(Debug, Clone, Default)]
/// Scriptable in-memory battery service.
///
/// In deferred mode `get_battery` stays pending until [`MemoryBatteryService::release_pending`].
pub struct MemoryBatteryService {
    manager: Rc<MemoryBatteryManager>,
    deferred: Rc<Cell<bool>>,
    pending: Rc<RefCell<Vec<oneshot::Sender<()>>>>,
    failure: Rc<RefCell<Option<String>>>,
    requests: Rc<Cell<usize>>,
}

impl MemoryBatteryService {
    /// Creates a service reporting `status`.
    pub fn new(status: BatteryStatus) -> Self {
        let service = Self::default();
        *service.manager.status.borrow_mut() = status;
        service
    }

    /// Keeps future requests pending until released.
    pub fn deferred(self) -> Self {
        self.deferred.set(true);
        self
    }

    /// Resolves every pending request.
    pub fn release_pending(&self) {
        for sender in self.pending.borrow_mut().drain(..) {
            let _ = sender.send(());
        }
    }

    /// Makes subsequent requests reject with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    /// Replaces the battery state and fires `change`.
    pub fn update(&self, status: BatteryStatus, change: BatteryChange) {
        *self.manager.status.borrow_mut() = status;
        self.manager.listeners.emit(change);
    }

    /// Number of attached battery listeners.
    pub fn listener_count(&self) -> usize {
        self.manager.listeners.len()
    }

    /// Number of `get_battery` calls so far.
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    fn outcome(&self) -> Result<Rc<dyn BatteryManager>, String> {
        match self.failure.borrow().clone() {
            Some(message) => Err(message),
            None => Ok(self.manager.clone() as Rc<dyn BatteryManager>),
        }
    }
}

impl BatteryService for MemoryBatteryService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn get_battery<'a>(&'a self) -> DeviceFuture<'a, Result<Rc<dyn BatteryManager>, String>> {
        self.requests.set(self.requests.get() + 1);
        if self.deferred.get() {
            let (sender, receiver) = oneshot::channel();
            self.pending.borrow_mut().push(sender);
            Box::pin(async move {
                receiver
                    .await
                    .map_err(|_| "battery request dropped".to_string())?;
                self.outcome()
            })
        } else {
            Box::pin(async move { self.outcome() })
        }
    }
}
