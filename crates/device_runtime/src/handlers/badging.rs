use device_host::{CapabilityStatus, DeviceServices};

use crate::{registry::CapabilityHandler, selection::Feature, session::HandlerContext};

pub(crate) struct BadgingHandler;

impl CapabilityHandler for BadgingHandler {
    fn feature(&self) -> Feature {
        Feature::Badging
    }

    fn unsupported_message(&self) -> &'static str {
        "Badge API not available on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.badge.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let (Some(set), Some(clear), Some(message)) = (
            ctx.button("Set App Badge"),
            ctx.button("Clear App Badge"),
            ctx.text(""),
        ) else {
            return;
        };

        let click_ctx = ctx.clone();
        ctx.on_click(set, move || {
            let ctx = click_ctx.clone();
            click_ctx.spawn(async move {
                let count = ctx.config().badge_count;
                match ctx.services().badge.set_app_badge(count).await {
                    Ok(()) => ctx.set_text(message, "Badge set to the app."),
                    Err(err) => ctx.set_text(message, format!("Badge error: {err}")),
                }
            });
        });

        let click_ctx = ctx.clone();
        ctx.on_click(clear, move || {
            let ctx = click_ctx.clone();
            click_ctx.spawn(async move {
                match ctx.services().badge.clear_app_badge().await {
                    Ok(()) => ctx.set_text(message, "Badge cleared from the app."),
                    Err(err) => ctx.set_text(message, format!("Badge error: {err}")),
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use device_host::MemoryBadgeService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    #[test]
    fn set_and_clear() {
        let badge = MemoryBadgeService::default();
        let service = badge.clone();
        let mut harness =
            Harness::with(move |fakes: &mut Fakes| fakes.services.badge = Rc::new(service));
        harness.dispatcher.select("badging");

        harness.click("Set App Badge");
        assert_eq!(badge.badge(), Some(12));
        assert!(harness.text().ends_with("Badge set to the app."));

        harness.click("Clear App Badge");
        assert_eq!(badge.badge(), None);
        assert_eq!(badge.calls(), vec![Some(12), None]);
        assert!(harness.text().ends_with("Badge cleared from the app."));
    }

    #[test]
    fn failures_stay_inline() {
        let badge = MemoryBadgeService::default();
        badge.fail_with("NotAllowedError");
        let service = badge.clone();
        let mut harness =
            Harness::with(move |fakes: &mut Fakes| fakes.services.badge = Rc::new(service));
        harness.dispatcher.select("badging");
        harness.click("Set App Badge");

        assert_eq!(
            harness.text(),
            "Set App Badge\nClear App Badge\nBadge error: NotAllowedError"
        );
    }
}
