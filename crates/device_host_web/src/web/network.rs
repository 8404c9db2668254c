use std::rc::Rc;

use device_host::{CapabilityStatus, ConnectionInfo, NetworkInfoService, Subscription};

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Network information adapter backed by `navigator.connection`.
pub struct WebNetworkInfoService;

impl NetworkInfoService for WebNetworkInfoService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator().is_some_and(|navigator| interop::has(&navigator, "connection")),
        )
    }

    fn connection(&self) -> ConnectionInfo {
        let Ok(connection) = interop::navigator_member("connection") else {
            return ConnectionInfo::default();
        };
        ConnectionInfo {
            kind: interop::get_string(&connection, "type"),
            effective_type: interop::get_string(&connection, "effectiveType"),
            downlink: interop::get_f64(&connection, "downlink"),
            downlink_max: interop::get_f64(&connection, "downlinkMax"),
        }
    }

    fn on_change(&self, listener: Rc<dyn Fn()>) -> Subscription {
        match interop::navigator_member("connection") {
            Ok(connection) => interop::listen(&connection, "change", move |_| listener()),
            Err(_) => Subscription::detached(),
        }
    }
}
