use device_host::{CapabilityStatus, DeviceServices, VibrationPattern};
use leptos::logging;

use crate::{registry::CapabilityHandler, selection::Feature, session::HandlerContext};

pub(crate) struct VibrationHandler;

fn vibrate(ctx: &HandlerContext, pattern: &VibrationPattern) {
    if !ctx.services().vibration.vibrate(pattern) {
        logging::warn!("vibration request {:?} was refused", pattern.steps());
    }
}

impl CapabilityHandler for VibrationHandler {
    fn feature(&self) -> Feature {
        Feature::Vibration
    }

    fn unsupported_message(&self) -> &'static str {
        "Vibration is not supported on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.vibration.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let (Some(single), Some(multiple)) = (
            ctx.button("Single Vibration"),
            ctx.button("Multiple Vibration"),
        ) else {
            return;
        };

        let single_pattern = VibrationPattern::single(ctx.config().single_vibration_ms);
        let click_ctx = ctx.clone();
        ctx.on_click(single, move || vibrate(&click_ctx, &single_pattern));

        let sequence = VibrationPattern::sequence(ctx.config().vibration_sequence_ms.clone());
        let click_ctx = ctx.clone();
        ctx.on_click(multiple, move || vibrate(&click_ctx, &sequence));
    }
}
