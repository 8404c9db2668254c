use device_host::{CapabilityStatus, DeviceFuture, OrientationLock, ScreenOrientationService};
use wasm_bindgen::JsValue;

use super::interop;

fn orientation() -> Result<JsValue, String> {
    let screen = interop::screen().ok_or_else(|| "screen unavailable".to_string())?;
    interop::get(&screen, "orientation").ok_or_else(|| "screen.orientation unavailable".to_string())
}

#[derive(Debug, Clone, Copy, Default)]
/// Orientation adapter backed by `screen.orientation`.
pub struct WebScreenOrientationService;

impl ScreenOrientationService for WebScreenOrientationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::screen().is_some_and(|screen| interop::has(&screen, "orientation")),
        )
    }

    fn orientation_type(&self) -> String {
        orientation()
            .ok()
            .and_then(|orientation| interop::get_string(&orientation, "type"))
            .unwrap_or_default()
    }

    fn lock<'a>(&'a self, lock: OrientationLock) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let orientation = orientation()?;
            interop::call_async(&orientation, "lock", &[JsValue::from_str(lock.as_str())]).await?;
            Ok(())
        })
    }

    fn unlock(&self) {
        if let Ok(orientation) = orientation() {
            let _ = interop::call(&orientation, "unlock", &[]);
        }
    }
}
