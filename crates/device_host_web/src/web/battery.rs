use std::rc::Rc;

use device_host::{
    BatteryChange, BatteryManager, BatteryService, BatteryStatus, CapabilityStatus, DeviceFuture,
    Subscription,
};
use wasm_bindgen::JsValue;

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Battery adapter backed by `navigator.getBattery()`.
pub struct WebBatteryService;

impl BatteryService for WebBatteryService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator().is_some_and(|navigator| interop::has(&navigator, "getBattery")),
        )
    }

    fn get_battery<'a>(&'a self) -> DeviceFuture<'a, Result<Rc<dyn BatteryManager>, String>> {
        Box::pin(async move {
            let navigator =
                interop::navigator().ok_or_else(|| "navigator unavailable".to_string())?;
            let manager = interop::call_async(&navigator, "getBattery", &[]).await?;
            Ok(Rc::new(WebBatteryManager { manager }) as Rc<dyn BatteryManager>)
        })
    }
}

struct WebBatteryManager {
    manager: JsValue,
}

impl BatteryManager for WebBatteryManager {
    fn status(&self) -> BatteryStatus {
        BatteryStatus {
            charging: interop::get_bool(&self.manager, "charging").unwrap_or(false),
            level: interop::get_f64(&self.manager, "level").unwrap_or(0.0),
            charging_time: interop::get_f64(&self.manager, "chargingTime")
                .unwrap_or(f64::INFINITY),
            discharging_time: interop::get_f64(&self.manager, "dischargingTime")
                .unwrap_or(f64::INFINITY),
        }
    }

    fn on_change(&self, listener: Rc<dyn Fn(BatteryChange)>) -> Subscription {
        let registrations: Vec<Subscription> = BatteryChange::ALL
            .into_iter()
            .map(|change| {
                let listener = Rc::clone(&listener);
                interop::listen(&self.manager, change.event_name(), move |_| listener(change))
            })
            .collect();
        Subscription::new(move || drop(registrations))
    }
}
