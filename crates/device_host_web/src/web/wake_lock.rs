use std::{cell::RefCell, rc::Rc};

use device_host::{CapabilityStatus, DeviceFuture, WakeLockSentinel, WakeLockService};
use js_sys::Promise;
use wasm_bindgen::{closure::Closure, JsValue};

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Screen wake lock adapter backed by `navigator.wakeLock`.
pub struct WebWakeLockService;

impl WakeLockService for WebWakeLockService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator().is_some_and(|navigator| interop::has(&navigator, "wakeLock")),
        )
    }

    fn request_screen<'a>(
        &'a self,
    ) -> DeviceFuture<'a, Result<Box<dyn WakeLockSentinel>, String>> {
        Box::pin(async move {
            let wake_lock = interop::navigator_member("wakeLock")?;
            let pending = Promise::resolve(&interop::call(
                &wake_lock,
                "request",
                &[JsValue::from_str("screen")],
            )?);

            // Registered before the await so it runs ahead of the future's own continuation.
            let request = PendingRequest::default();
            let handoff = Rc::clone(&request.0);
            let on_granted = Closure::once_into_js(move |sentinel: JsValue| {
                let abandoned = {
                    let mut handoff = handoff.borrow_mut();
                    if !handoff.abandoned {
                        handoff.granted = Some(sentinel.clone());
                    }
                    handoff.abandoned
                };
                if abandoned {
                    release_detached(&sentinel);
                }
            });
            interop::call(&pending, "then", &[on_granted])?;

            interop::settle(pending.into()).await?;
            let sentinel = request
                .claim()
                .ok_or_else(|| "wake lock was not granted".to_string())?;
            Ok(Box::new(WebWakeLockSentinel { sentinel }) as Box<dyn WakeLockSentinel>)
        })
    }
}

#[derive(Default)]
struct LockHandoff {
    abandoned: bool,
    granted: Option<JsValue>,
}

/// Request side of a pending `wakeLock.request`.
///
/// Dropping it before the sentinel is claimed releases whatever the browser grants.
#[derive(Default)]
struct PendingRequest(Rc<RefCell<LockHandoff>>);

impl PendingRequest {
    fn claim(&self) -> Option<JsValue> {
        self.0.borrow_mut().granted.take()
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        let granted = {
            let mut handoff = self.0.borrow_mut();
            handoff.abandoned = true;
            handoff.granted.take()
        };
        if let Some(sentinel) = granted {
            release_detached(&sentinel);
        }
    }
}

fn release_detached(sentinel: &JsValue) {
    // The returned promise settles on its own.
    let _ = interop::call(sentinel, "release", &[]);
}

struct WebWakeLockSentinel {
    sentinel: JsValue,
}

impl WakeLockSentinel for WebWakeLockSentinel {
    fn release<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            interop::call_async(&self.sentinel, "release", &[]).await?;
            Ok(())
        })
    }

    fn is_released(&self) -> bool {
        interop::get_bool(&self.sentinel, "released").unwrap_or(true)
    }
}

impl Drop for WebWakeLockSentinel {
    fn drop(&mut self) {
        if !self.is_released() {
            release_detached(&self.sentinel);
        }
    }
}
