use std::rc::Rc;

use device_host::{CapabilityStatus, ConnectionInfo, DeviceServices};
use leptos::logging;

use crate::{
    registry::CapabilityHandler,
    selection::Feature,
    session::HandlerContext,
    surface::{escape_html, js_number},
};

pub(crate) struct NetworkHandler;

const UNKNOWN: &str = "unknown";

fn label(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .map_or_else(|| UNKNOWN.to_string(), escape_html)
}

fn megabits(value: Option<f64>) -> String {
    value
        .filter(|value| *value != 0.0 && !value.is_nan())
        .map_or_else(|| UNKNOWN.to_string(), js_number)
}

fn render(info: &ConnectionInfo) -> String {
    format!(
        "<div>Current network type: <strong>{}</strong></div>\
         <div>Cellular connection type: <strong>{}</strong></div>\
         <div>Estimated bandwidth: <strong>{}</strong> Mbps</div>\
         <div>Maximum downlink: <strong>{}</strong> Mbps</div>",
        label(&info.kind),
        label(&info.effective_type),
        megabits(info.downlink),
        megabits(info.downlink_max),
    )
}

impl CapabilityHandler for NetworkHandler {
    fn feature(&self) -> Feature {
        Feature::NetworkInfo
    }

    fn unsupported_message(&self) -> &'static str {
        "Network information not available on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.network.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        ctx.replace_markup(render(&ctx.services().network.connection()));

        let listener_ctx = ctx.clone();
        ctx.hold(ctx.services().network.on_change(Rc::new(move || {
            let info = listener_ctx.services().network.connection();
            logging::log!("connection changed: {info:?}");
            listener_ctx.replace_markup(render(&info));
        })));
    }
}

#[cfg(test)]
mod tests {
    use device_host::MemoryNetworkInfoService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    #[test]
    fn missing_values_render_unknown() {
        let network = MemoryNetworkInfoService::new(ConnectionInfo {
            kind: None,
            effective_type: Some("4g".to_string()),
            downlink: Some(0.0),
            downlink_max: None,
        });
        let service = network.clone();
        let harness =
            Harness::with(move |fakes: &mut Fakes| fakes.services.network = Rc::new(service));
        harness.dispatcher.select("network-info");

        assert_eq!(
            harness.text(),
            "Current network type: unknownCellular connection type: 4g\
             Estimated bandwidth: unknown MbpsMaximum downlink: unknown Mbps"
        );
        assert_eq!(network.listener_count(), 1);
    }

    #[test]
    fn change_event_rerenders() {
        let network = MemoryNetworkInfoService::default();
        let service = network.clone();
        let harness =
            Harness::with(move |fakes: &mut Fakes| fakes.services.network = Rc::new(service));
        harness.dispatcher.select("network-info");

        network.update(ConnectionInfo {
            kind: Some("wifi".to_string()),
            effective_type: Some("4g".to_string()),
            downlink: Some(1.45),
            downlink_max: Some(f64::INFINITY),
        });

        let text = harness.text();
        assert!(text.contains("Current network type: wifi"));
        assert!(text.contains("Estimated bandwidth: 1.45 Mbps"));
        assert!(text.contains("Maximum downlink: Infinity Mbps"));

        harness.dispatcher.select("battery");
        assert_eq!(network.listener_count(), 0);
    }
}
