use device_host::{CapabilityStatus, DeviceFuture, ServiceWorkerService};
use js_sys::Object;
use wasm_bindgen::JsValue;

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Service worker adapter backed by `navigator.serviceWorker`.
pub struct WebServiceWorkerService;

impl ServiceWorkerService for WebServiceWorkerService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator()
                .is_some_and(|navigator| interop::has(&navigator, "serviceWorker")),
        )
    }

    fn register<'a>(
        &'a self,
        script_url: &'a str,
        scope: &'a str,
    ) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let container = interop::navigator_member("serviceWorker")?;
            let options = Object::new();
            interop::set(&options, "scope", &JsValue::from_str(scope))?;
            interop::call_async(
                &container,
                "register",
                &[JsValue::from_str(script_url), options.into()],
            )
            .await?;
            Ok(())
        })
    }
}
