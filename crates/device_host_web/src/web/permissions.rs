use std::rc::Rc;

use device_host::{
    CapabilityStatus, DeviceFuture, PermissionState, PermissionStatus, PermissionsService,
    Subscription,
};
use serde::Serialize;
use wasm_bindgen::JsValue;

use super::interop;

/// `PermissionDescriptor` passed to `navigator.permissions.query`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionDescriptor<'a> {
    name: &'a str,
    user_visible_only: bool,
}

#[derive(Debug, Clone, Copy, Default)]
/// Permissions adapter backed by `navigator.permissions`.
pub struct WebPermissionsService;

impl PermissionsService for WebPermissionsService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator().is_some_and(|navigator| interop::has(&navigator, "permissions")),
        )
    }

    fn query<'a>(
        &'a self,
        name: &'a str,
    ) -> DeviceFuture<'a, Result<Rc<dyn PermissionStatus>, String>> {
        Box::pin(async move {
            let permissions = interop::navigator_member("permissions")?;
            let descriptor = serde_wasm_bindgen::to_value(&PermissionDescriptor {
                name,
                user_visible_only: true,
            })
            .map_err(|err| err.to_string())?;
            let status = interop::call_async(&permissions, "query", &[descriptor]).await?;
            Ok(Rc::new(WebPermissionStatus { status }) as Rc<dyn PermissionStatus>)
        })
    }
}

struct WebPermissionStatus {
    status: JsValue,
}

fn read_state(status: &JsValue) -> PermissionState {
    interop::get_string(status, "state")
        .map_or(PermissionState::Prompt, |token| PermissionState::from_token(&token))
}

impl PermissionStatus for WebPermissionStatus {
    fn name(&self) -> Option<String> {
        interop::get_string(&self.status, "name")
    }

    fn state(&self) -> PermissionState {
        read_state(&self.status)
    }

    fn on_change(&self, listener: Rc<dyn Fn(PermissionState)>) -> Subscription {
        let status = self.status.clone();
        interop::listen(&self.status, "change", move |_| listener(read_state(&status)))
    }
}
