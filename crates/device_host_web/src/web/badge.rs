use device_host::{BadgeService, CapabilityStatus, DeviceFuture};
use wasm_bindgen::JsValue;

use super::interop;

/// Picks the app-level badging method, falling back to the client-level one.
fn badge_method(
    app: &'static str,
    client: &'static str,
) -> Result<(JsValue, &'static str), String> {
    let navigator = interop::navigator().ok_or_else(|| "navigator unavailable".to_string())?;
    if interop::has(&navigator, app) {
        Ok((navigator, app))
    } else if interop::has(&navigator, client) {
        Ok((navigator, client))
    } else {
        Err(format!("navigator.{app} unavailable"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Badging adapter backed by `navigator.setAppBadge` / `navigator.setClientBadge`.
pub struct WebBadgeService;

impl BadgeService for WebBadgeService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(interop::navigator().is_some_and(|navigator| {
            interop::has(&navigator, "setAppBadge") || interop::has(&navigator, "setClientBadge")
        }))
    }

    fn set_app_badge<'a>(&'a self, count: u32) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let (navigator, method) = badge_method("setAppBadge", "setClientBadge")?;
            interop::call_async(&navigator, method, &[JsValue::from(count)]).await?;
            Ok(())
        })
    }

    fn clear_app_badge<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let (navigator, method) = badge_method("clearAppBadge", "clearClientBadge")?;
            interop::call_async(&navigator, method, &[]).await?;
            Ok(())
        })
    }
}
