use device_host::{CapabilityStatus, DeviceServices};

use crate::{registry::CapabilityHandler, selection::Feature, session::HandlerContext};

pub(crate) struct FullscreenHandler;

const UNSUPPORTED: &str = "Fullscreen not available or enabled on this device.";

/// Appends the fullscreen toggle, or the fallback text when fullscreen is unavailable.
pub(super) fn mount(ctx: &HandlerContext) {
    if ctx.services().fullscreen.probe().is_supported() {
        attach(ctx);
    } else {
        ctx.text(UNSUPPORTED);
    }
}

fn attach(ctx: &HandlerContext) {
    let (Some(button), Some(message)) = (
        ctx.button("Toggle Fullscreen"),
        ctx.text("Click on the button above"),
    ) else {
        return;
    };

    let click_ctx = ctx.clone();
    ctx.on_click(button, move || {
        let ctx = click_ctx.clone();
        click_ctx.spawn(async move {
            let fullscreen = &ctx.services().fullscreen;
            let (outcome, done) = if fullscreen.is_fullscreen() {
                (
                    fullscreen.exit_fullscreen().await,
                    "You left the fullscreen mode.",
                )
            } else {
                (
                    fullscreen.request_fullscreen().await,
                    "You are on fullscreen mode now.",
                )
            };
            match outcome {
                Ok(()) => ctx.set_text(message, done),
                Err(err) => ctx.set_text(message, format!("Fullscreen error: {err}")),
            }
        });
    });
}

impl CapabilityHandler for FullscreenHandler {
    fn feature(&self) -> Feature {
        Feature::Fullscreen
    }

    fn unsupported_message(&self) -> &'static str {
        UNSUPPORTED
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.fullscreen.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        attach(ctx);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use device_host::MemoryFullscreenService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    fn harness(fullscreen: &MemoryFullscreenService) -> Harness {
        let fullscreen = fullscreen.clone();
        Harness::with(move |fakes: &mut Fakes| fakes.services.fullscreen = Rc::new(fullscreen))
    }

    #[test]
    fn toggle_enters_then_leaves() {
        let fullscreen = MemoryFullscreenService::default();
        let mut harness = harness(&fullscreen);
        harness.dispatcher.select("fullscreen");
        assert_eq!(harness.text(), "Toggle Fullscreen\nClick on the button above");

        harness.click("Toggle Fullscreen");
        assert_eq!(fullscreen.request_count(), 1);
        assert!(harness.text().ends_with("You are on fullscreen mode now."));

        harness.click("Toggle Fullscreen");
        assert_eq!(fullscreen.exit_count(), 1);
        assert!(harness.text().ends_with("You left the fullscreen mode."));
    }

    #[test]
    fn rejection_is_shown_under_the_button() {
        let fullscreen = MemoryFullscreenService::default();
        fullscreen.fail_with("TypeError: Permissions check failed");
        let mut harness = harness(&fullscreen);
        harness.dispatcher.select("fullscreen");
        harness.click("Toggle Fullscreen");

        assert_eq!(
            harness.text(),
            "Toggle Fullscreen\nFullscreen error: TypeError: Permissions check failed"
        );
    }
}
