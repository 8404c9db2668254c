//! Built-in capability handlers, one module per selector entry.

mod badging;
mod battery;
mod fullscreen;
mod geolocation;
mod idle;
mod network;
mod orientation;
mod permissions;
mod vibration;
mod visibility;
mod wake_lock;

use std::rc::Rc;

use crate::registry::CapabilityHandler;

pub(crate) fn builtin() -> Vec<Rc<dyn CapabilityHandler>> {
    vec![
        Rc::new(battery::BatteryHandler),
        Rc::new(network::NetworkHandler),
        Rc::new(fullscreen::FullscreenHandler),
        Rc::new(orientation::OrientationHandler),
        Rc::new(vibration::VibrationHandler),
        Rc::new(badging::BadgingHandler),
        Rc::new(visibility::VisibilityHandler),
        Rc::new(idle::IdleHandler),
        Rc::new(wake_lock::WakeLockHandler),
        Rc::new(permissions::PermissionsHandler),
        Rc::new(geolocation::GeolocationHandler),
    ]
}
