use std::rc::Rc;

use device_host::{BatteryChange, BatteryStatus, CapabilityStatus, DeviceServices};
use leptos::logging;

use crate::{
    registry::CapabilityHandler,
    selection::Feature,
    session::HandlerContext,
    surface::{js_number, js_whole},
};

pub(crate) struct BatteryHandler;

fn render(status: &BatteryStatus) -> String {
    let charging = if status.charging { "Yes" } else { "No" };
    format!(
        "<div>Bettery charging: <strong>{charging}</strong></div>\
         <div>Bettery level: <strong>{}%</strong></div>\
         <div>Charging time: <strong>{} seconds</strong></div>\
         <div>Discharging time: <strong>{} seconds</strong></div>",
        js_whole(status.level * 100.0),
        js_number(status.charging_time),
        js_number(status.discharging_time),
    )
}

impl CapabilityHandler for BatteryHandler {
    fn feature(&self) -> Feature {
        Feature::Battery
    }

    fn unsupported_message(&self) -> &'static str {
        "Battery API not supported on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.battery.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let task_ctx = ctx.clone();
        ctx.spawn(async move {
            let ctx = task_ctx;
            let manager = match ctx.services().battery.get_battery().await {
                Ok(manager) => manager,
                Err(err) => {
                    ctx.replace_text(format!("Battery status unavailable: {err}"));
                    return;
                }
            };
            ctx.replace_markup(render(&manager.status()));

            let listener_ctx = ctx.clone();
            let observed = Rc::clone(&manager);
            ctx.hold(manager.on_change(Rc::new(move |change: BatteryChange| {
                let status = observed.status();
                logging::log!("battery {}: {status:?}", change.event_name());
                listener_ctx.replace_markup(render(&status));
            })));
        });
    }
}
