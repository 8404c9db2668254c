use device_host::{CapabilityStatus, VibrationPattern, VibrationService};
use js_sys::Array;
use wasm_bindgen::JsValue;

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Vibration adapter backed by `navigator.vibrate`.
pub struct WebVibrationService;

impl VibrationService for WebVibrationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator().is_some_and(|navigator| interop::has(&navigator, "vibrate")),
        )
    }

    fn vibrate(&self, pattern: &VibrationPattern) -> bool {
        let Some(navigator) = interop::navigator() else {
            return false;
        };
        let steps: Array = pattern.steps().iter().map(|step| JsValue::from(*step)).collect();
        interop::call(&navigator, "vibrate", &[steps.into()])
            .ok()
            .and_then(|accepted| accepted.as_bool())
            .unwrap_or(false)
    }
}
