//! Typed capability contracts shared by the device demo runtime and browser adapters.
//!
//! Every browser-provided device feature the demo touches is modeled as one object-safe service
//! trait. Each trait reports whether the capability is present through
//! [`CapabilityStatus`], exposes async operations as boxed local futures, and hands out
//! [`Subscription`] guards for event listeners so their lifetime is explicit.
//!
//! Concrete browser adapters live in `device_host_web`. This crate also ships `Noop*` adapters
//! (always unsupported) and `Memory*` adapters (scriptable fakes) for native tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod badge;
pub mod battery;
pub mod capability;
pub mod fullscreen;
pub mod geolocation;
pub mod host;
pub mod idle;
pub mod listener;
pub mod network;
pub mod notifications;
pub mod orientation;
pub mod permissions;
pub mod service_worker;
pub mod time;
pub mod timer;
pub mod vibration;
pub mod visibility;
pub mod wake_lock;

pub use badge::{BadgeService, MemoryBadgeService, NoopBadgeService};
pub use battery::{
    BatteryChange, BatteryManager, BatteryService, BatteryStatus, MemoryBatteryService,
    NoopBatteryService,
};
pub use capability::{CapabilityStatus, DeviceFuture};
pub use fullscreen::{FullscreenService, MemoryFullscreenService, NoopFullscreenService};
pub use geolocation::{
    GeoPosition, GeolocationService, MemoryGeolocationService, NoopGeolocationService,
    PositionListener,
};
pub use host::DeviceServices;
pub use idle::{
    IdleDetectionService, IdleDetector, IdleState, MemoryIdleDetectionService,
    NoopIdleDetectionService,
};
pub use listener::{ListenerRegistry, Subscription};
pub use network::{
    ConnectionInfo, MemoryNetworkInfoService, NetworkInfoService, NoopNetworkInfoService,
};
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, Notice, NotificationPermission,
    NotificationService,
};
pub use orientation::{
    MemoryScreenOrientationService, NoopScreenOrientationService, OrientationLock,
    ScreenOrientationService,
};
pub use permissions::{
    MemoryPermissionsService, NoopPermissionsService, PermissionState, PermissionStatus,
    PermissionsService, KNOWN_PERMISSION_NAMES,
};
pub use service_worker::{
    MemoryServiceWorkerService, NoopServiceWorkerService, ServiceWorkerService,
};
pub use time::{unix_time_ms_now, Clock, ManualClock, SystemClock};
pub use timer::{ManualTimerService, NoopTimerService, TimerService};
pub use vibration::{
    MemoryVibrationService, NoopVibrationService, VibrationPattern, VibrationService,
};
pub use visibility::{
    MemoryPageVisibilityService, NoopPageVisibilityService, PageVisibilityService, VisibilityState,
};
pub use wake_lock::{MemoryWakeLockService, NoopWakeLockService, WakeLockSentinel, WakeLockService};
