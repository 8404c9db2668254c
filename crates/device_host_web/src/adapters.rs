use device_host::DeviceServices;

/// Returns a stable token naming the adapter set compiled into this build.
pub const fn host_strategy_name() -> &'static str {
    #[cfg(target_arch = "wasm32")]
    {
        "browser"
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        "native-stub"
    }
}

/// Assembles the capability bundle for the active target.
///
/// On `wasm32` every service is backed by the browser. Elsewhere every capability reports
/// unsupported, which keeps native builds and tests runnable.
pub fn build_device_services() -> DeviceServices {
    #[cfg(target_arch = "wasm32")]
    {
        use std::rc::Rc;

        use device_host::SystemClock;

        use crate::web::{
            WebBadgeService, WebBatteryService, WebFullscreenService, WebGeolocationService,
            WebIdleDetectionService, WebNetworkInfoService, WebNotificationService,
            WebPageVisibilityService, WebPermissionsService, WebScreenOrientationService,
            WebServiceWorkerService, WebTimerService, WebVibrationService, WebWakeLockService,
        };

        DeviceServices {
            battery: Rc::new(WebBatteryService),
            network: Rc::new(WebNetworkInfoService),
            fullscreen: Rc::new(WebFullscreenService),
            orientation: Rc::new(WebScreenOrientationService),
            vibration: Rc::new(WebVibrationService),
            badge: Rc::new(WebBadgeService),
            visibility: Rc::new(WebPageVisibilityService),
            notifications: Rc::new(WebNotificationService),
            idle: Rc::new(WebIdleDetectionService),
            wake_lock: Rc::new(WebWakeLockService),
            permissions: Rc::new(WebPermissionsService),
            geolocation: Rc::new(WebGeolocationService),
            service_worker: Rc::new(WebServiceWorkerService),
            timer: Rc::new(WebTimerService),
            clock: Rc::new(SystemClock),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        DeviceServices::unsupported()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_bundle_reports_everything_unsupported() {
        let services = build_device_services();

        assert_eq!(host_strategy_name(), "native-stub");
        assert!(!services.battery.probe().is_supported());
        assert!(!services.network.probe().is_supported());
        assert!(!services.fullscreen.probe().is_supported());
        assert!(!services.orientation.probe().is_supported());
        assert!(!services.vibration.probe().is_supported());
        assert!(!services.badge.probe().is_supported());
        assert!(!services.visibility.probe().is_supported());
        assert!(!services.idle.probe().is_supported());
        assert!(!services.wake_lock.probe().is_supported());
        assert!(!services.permissions.probe().is_supported());
        assert!(!services.geolocation.probe().is_supported());
        assert!(!services.service_worker.probe().is_supported());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_bundle_rejects_async_operations() {
        let services = build_device_services();

        assert!(block_on(services.battery.get_battery()).is_err());
        assert!(block_on(services.wake_lock.request_screen()).is_err());
        assert!(block_on(services.permissions.query("camera")).is_err());
        assert_eq!(
            block_on(services.service_worker.register("/sw.js", "/")),
            Err("service workers are unavailable".to_string())
        );
    }
}
