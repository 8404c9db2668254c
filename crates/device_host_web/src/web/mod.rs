//! Browser adapters, one module per capability.

mod badge;
mod battery;
mod fullscreen;
mod geolocation;
mod idle;
mod interop;
mod network;
mod notifications;
mod orientation;
mod permissions;
mod service_worker;
mod timer;
mod vibration;
mod visibility;
mod wake_lock;

pub use badge::WebBadgeService;
pub use battery::WebBatteryService;
pub use fullscreen::WebFullscreenService;
pub use geolocation::WebGeolocationService;
pub use idle::WebIdleDetectionService;
pub use network::WebNetworkInfoService;
pub use notifications::WebNotificationService;
pub use orientation::WebScreenOrientationService;
pub use permissions::WebPermissionsService;
pub use service_worker::WebServiceWorkerService;
pub use timer::WebTimerService;
pub use vibration::WebVibrationService;
pub use visibility::WebPageVisibilityService;
pub use wake_lock::WebWakeLockService;
