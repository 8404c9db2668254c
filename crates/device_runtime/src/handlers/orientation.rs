use device_host::{CapabilityStatus, DeviceServices, OrientationLock};

use super::fullscreen;
use crate::{
    registry::CapabilityHandler, selection::Feature, session::HandlerContext, surface::BlockId,
};

pub(crate) struct OrientationHandler;

fn lock_on_click(ctx: &HandlerContext, button: BlockId, message: BlockId, lock: OrientationLock) {
    let click_ctx = ctx.clone();
    ctx.on_click(button, move || {
        let ctx = click_ctx.clone();
        click_ctx.spawn(async move {
            let orientation = &ctx.services().orientation;
            match orientation.lock(lock).await {
                Ok(()) => ctx.set_text(
                    message,
                    format!("Locked to {}", orientation.orientation_type()),
                ),
                Err(err) => ctx.set_text(message, format!("Lock error: {err}")),
            }
        });
    });
}

impl CapabilityHandler for OrientationHandler {
    fn feature(&self) -> Feature {
        Feature::ScreenOrientation
    }

    fn unsupported_message(&self) -> &'static str {
        "Screen orientation is not available on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.orientation.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        fullscreen::mount(ctx);

        let (Some(portrait), Some(landscape), Some(unlock), Some(message)) = (
            ctx.button("Lock Portrait"),
            ctx.button("Lock Landscape"),
            ctx.button("Unlock"),
            ctx.text(""),
        ) else {
            return;
        };

        lock_on_click(ctx, portrait, message, OrientationLock::Portrait);
        lock_on_click(ctx, landscape, message, OrientationLock::Landscape);

        let click_ctx = ctx.clone();
        ctx.on_click(unlock, move || {
            click_ctx.services().orientation.unlock();
            click_ctx.set_text(message, "Orientation unlocked");
        });
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use device_host::{MemoryFullscreenService, MemoryScreenOrientationService};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    #[test]
    fn without_fullscreen_the_fallback_precedes_the_lock_buttons() {
        let orientation = MemoryScreenOrientationService::default();
        let service = orientation.clone();
        let harness = Harness::with(move |fakes: &mut Fakes| {
            fakes.services.orientation = Rc::new(service);
        });
        harness.dispatcher.select("screen-orientation");

        assert_eq!(
            harness.text(),
            "Fullscreen not available or enabled on this device.\n\
             Lock Portrait\nLock Landscape\nUnlock\n"
        );
    }

    #[test]
    fn lock_and_unlock() {
        let orientation = MemoryScreenOrientationService::default();
        let service = orientation.clone();
        let mut harness = Harness::with(move |fakes: &mut Fakes| {
            fakes.services.orientation = Rc::new(service);
            fakes.services.fullscreen = Rc::new(MemoryFullscreenService::default());
        });
        harness.dispatcher.select("screen-orientation");
        assert!(harness.text().starts_with("Toggle Fullscreen\nClick on the button above"));

        harness.click("Lock Landscape");
        assert_eq!(orientation.locked(), Some(OrientationLock::Landscape));
        assert!(harness.text().ends_with("Locked to landscape-primary"));

        harness.click("Unlock");
        assert_eq!(orientation.unlock_count(), 1);
        assert!(harness.text().ends_with("Orientation unlocked"));
    }

    #[test]
    fn lock_failure_is_reported() {
        let orientation = MemoryScreenOrientationService::default();
        orientation.fail_with("NotSupportedError: screen.orientation.lock() is not available");
        let service = orientation.clone();
        let mut harness = Harness::with(move |fakes: &mut Fakes| {
            fakes.services.orientation = Rc::new(service);
        });
        harness.dispatcher.select("screen-orientation");
        harness.click("Lock Portrait");

        assert_eq!(
            harness.text().lines().last(),
            Some("Lock error: NotSupportedError: screen.orientation.lock() is not available")
        );
    }
}
