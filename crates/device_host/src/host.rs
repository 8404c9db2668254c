//! Service bundle handed to the runtime at startup.

use std::rc::Rc;

use crate::{
    BadgeService, BatteryService, Clock, FullscreenService, GeolocationService,
    IdleDetectionService, NetworkInfoService, NoopBadgeService, NoopBatteryService,
    NoopFullscreenService, NoopGeolocationService, NoopIdleDetectionService,
    NoopNetworkInfoService, NoopNotificationService, NoopPageVisibilityService,
    NoopPermissionsService, NoopScreenOrientationService, NoopServiceWorkerService,
    NoopTimerService, NoopVibrationService, NoopWakeLockService, NotificationService,
    PageVisibilityService, PermissionsService, ScreenOrientationService, ServiceWorkerService,
    SystemClock, TimerService, VibrationService, WakeLockService,
};

/// Every capability provider the demo can talk to.
///
/// The bundle is assembled once by the entry layer (browser adapters or test fakes) and cloned
/// cheaply into handlers.
#[derive(Clone)]
pub struct DeviceServices {
    /// Battery Status API.
    pub battery: Rc<dyn BatteryService>,
    /// Network Information API.
    pub network: Rc<dyn NetworkInfoService>,
    /// Fullscreen API.
    pub fullscreen: Rc<dyn FullscreenService>,
    /// Screen Orientation API.
    pub orientation: Rc<dyn ScreenOrientationService>,
    /// Vibration API.
    pub vibration: Rc<dyn VibrationService>,
    /// Badging API.
    pub badge: Rc<dyn BadgeService>,
    /// Page Visibility API.
    pub visibility: Rc<dyn PageVisibilityService>,
    /// Notifications shown from the service worker registration.
    pub notifications: Rc<dyn NotificationService>,
    /// Idle Detection API.
    pub idle: Rc<dyn IdleDetectionService>,
    /// Screen Wake Lock API.
    pub wake_lock: Rc<dyn WakeLockService>,
    /// Permissions API.
    pub permissions: Rc<dyn PermissionsService>,
    /// Geolocation API.
    pub geolocation: Rc<dyn GeolocationService>,
    /// Service worker registration.
    pub service_worker: Rc<dyn ServiceWorkerService>,
    /// Repeating timers.
    pub timer: Rc<dyn TimerService>,
    /// Wall clock.
    pub clock: Rc<dyn Clock>,
}

impl DeviceServices {
    /// Bundle where every capability reports unsupported.
    pub fn unsupported() -> Self {
        Self {
            battery: Rc::new(NoopBatteryService),
            network: Rc::new(NoopNetworkInfoService),
            fullscreen: Rc::new(NoopFullscreenService),
            orientation: Rc::new(NoopScreenOrientationService),
            vibration: Rc::new(NoopVibrationService),
            badge: Rc::new(NoopBadgeService),
            visibility: Rc::new(NoopPageVisibilityService),
            notifications: Rc::new(NoopNotificationService),
            idle: Rc::new(NoopIdleDetectionService),
            wake_lock: Rc::new(NoopWakeLockService),
            permissions: Rc::new(NoopPermissionsService),
            geolocation: Rc::new(NoopGeolocationService),
            service_worker: Rc::new(NoopServiceWorkerService),
            timer: Rc::new(NoopTimerService),
            clock: Rc::new(SystemClock),
        }
    }
}

impl Default for DeviceServices {
    fn default() -> Self {
        Self::unsupported()
    }
}

impl std::fmt::Debug for DeviceServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceServices")
            .field("battery", &self.battery.probe())
            .field("network", &self.network.probe())
            .field("fullscreen", &self.fullscreen.probe())
            .field("orientation", &self.orientation.probe())
            .field("vibration", &self.vibration.probe())
            .field("badge", &self.badge.probe())
            .field("visibility", &self.visibility.probe())
            .field("idle", &self.idle.probe())
            .field("wake_lock", &self.wake_lock.probe())
            .field("permissions", &self.permissions.probe())
            .field("geolocation", &self.geolocation.probe())
            .field("service_worker", &self.service_worker.probe())
            .finish_non_exhaustive()
    }
}
