use std::rc::Rc;

use device_host::{CapabilityStatus, DeviceServices, GeoPosition};
use leptos::logging;

use crate::{
    registry::CapabilityHandler,
    selection::Feature,
    session::HandlerContext,
    surface::{js_number, BlockId},
};

pub(crate) struct GeolocationHandler;

const WATCH_KEY: &str = "geolocation-watch";

fn show_fix(ctx: &HandlerContext, message: BlockId, fix: Result<GeoPosition, String>) {
    match fix {
        Ok(position) => {
            logging::log!("position: {position:?}");
            ctx.set_markup(
                message,
                format!(
                    "<br>Latitude: {}<br>Longitude: {}<br>More or less {} meters.",
                    js_number(position.latitude),
                    js_number(position.longitude),
                    js_number(position.accuracy)
                ),
            );
        }
        Err(err) => {
            logging::log!("geolocation error: {err}");
            ctx.set_text(message, "Geolocation failed.");
        }
    }
}

impl CapabilityHandler for GeolocationHandler {
    fn feature(&self) -> Feature {
        Feature::Geolocation
    }

    fn unsupported_message(&self) -> &'static str {
        "Geolocation API not available on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.geolocation.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let (Some(current), Some(watch), Some(message)) = (
            ctx.button("Current Position"),
            ctx.button("Watch Position"),
            ctx.text(""),
        ) else {
            return;
        };

        let click_ctx = ctx.clone();
        ctx.on_click(current, move || {
            let ctx = click_ctx.clone();
            click_ctx.spawn(async move {
                let fix = ctx.services().geolocation.current_position().await;
                show_fix(&ctx, message, fix);
            });
        });

        let click_ctx = ctx.clone();
        ctx.on_click(watch, move || {
            let listener_ctx = click_ctx.clone();
            let subscription = click_ctx
                .services()
                .geolocation
                .watch_position(Rc::new(move |fix: Result<GeoPosition, String>| {
                    show_fix(&listener_ctx, message, fix)
                }));
            click_ctx.hold_keyed(WATCH_KEY, subscription);
        });
    }
}

#[cfg(test)]
mod tests {
    use device_host::MemoryGeolocationService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    const HOME: GeoPosition = GeoPosition {
        latitude: 40.4168,
        longitude: -3.7038,
        accuracy: 35.0,
    };

    fn harness(geolocation: &MemoryGeolocationService) -> Harness {
        let service = geolocation.clone();
        let harness = Harness::with(move |fakes: &mut Fakes| {
            fakes.services.geolocation = Rc::new(service);
        });
        harness.dispatcher.select("geolocation");
        harness
    }

    #[test]
    fn current_position_renders_coordinates() {
        let geolocation = MemoryGeolocationService::default();
        geolocation.set_fix(Ok(HOME));
        let mut harness = harness(&geolocation);
        harness.click("Current Position");

        assert_eq!(
            harness.text(),
            "Current Position\nWatch Position\n\
             Latitude: 40.4168Longitude: -3.7038More or less 35 meters."
        );
    }

    #[test]
    fn failure_is_reported() {
        let geolocation = MemoryGeolocationService::default();
        geolocation.set_fix(Err("User denied Geolocation".to_string()));
        let mut harness = harness(&geolocation);
        harness.click("Current Position");

        assert!(harness.text().ends_with("Geolocation failed."));
    }

    #[test]
    fn watching_again_replaces_the_watch() {
        let geolocation = MemoryGeolocationService::default();
        let mut harness = harness(&geolocation);
        harness.click("Watch Position");
        harness.click("Watch Position");
        assert_eq!(geolocation.watch_count(), 1);

        geolocation.push(Ok(HOME));
        assert!(harness.text().ends_with("More or less 35 meters."));

        harness.dispatcher.select("battery");
        assert_eq!(geolocation.watch_count(), 0);
    }
}
