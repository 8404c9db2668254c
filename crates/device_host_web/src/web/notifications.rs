use device_host::{DeviceFuture, Notice, NotificationPermission, NotificationService};
use serde::Serialize;
use wasm_bindgen::JsValue;

use super::interop;

/// Options bag for `ServiceWorkerRegistration.showNotification`.
#[derive(Serialize)]
struct NotificationOptions<'a> {
    body: &'a str,
    icon: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
/// Notification adapter that shows notices through the ready service worker registration.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, NotificationPermission> {
        Box::pin(async move {
            let Some(constructor) = interop::window()
                .and_then(|window| interop::get(&JsValue::from(window), "Notification"))
            else {
                return NotificationPermission::Denied;
            };
            match interop::call_async(&constructor, "requestPermission", &[]).await {
                Ok(token) => {
                    NotificationPermission::from_token(&token.as_string().unwrap_or_default())
                }
                Err(_) => NotificationPermission::Denied,
            }
        })
    }

    fn show<'a>(&'a self, notice: &'a Notice) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let container = interop::navigator_member("serviceWorker")?;
            let ready = interop::get(&container, "ready")
                .ok_or_else(|| "serviceWorker.ready unavailable".to_string())?;
            let registration = interop::settle(ready).await?;
            let options = serde_wasm_bindgen::to_value(&NotificationOptions {
                body: &notice.body,
                icon: &notice.icon,
            })
            .map_err(|err| err.to_string())?;
            interop::call_async(
                &registration,
                "showNotification",
                &[JsValue::from_str(&notice.title), options],
            )
            .await?;
            Ok(())
        })
    }
}
