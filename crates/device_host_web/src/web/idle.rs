use std::rc::Rc;

use device_host::{
    CapabilityStatus, DeviceFuture, IdleDetectionService, IdleDetector, IdleState, Subscription,
};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::AbortController;

use super::interop;

fn detector_constructor() -> Result<Function, String> {
    let window = interop::window().ok_or_else(|| "window unavailable".to_string())?;
    interop::get(&JsValue::from(window), "IdleDetector")
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| "IdleDetector unavailable".to_string())
}

#[derive(Debug, Clone, Copy, Default)]
/// Idle detection adapter backed by the global `IdleDetector` constructor.
pub struct WebIdleDetectionService;

impl IdleDetectionService for WebIdleDetectionService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(detector_constructor().is_ok())
    }

    fn request_permission<'a>(&'a self) -> DeviceFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let constructor: JsValue = detector_constructor()?.into();
            let state = interop::call_async(&constructor, "requestPermission", &[]).await?;
            state
                .as_string()
                .ok_or_else(|| "requestPermission returned a non-string state".to_string())
        })
    }

    fn create_detector(&self) -> Result<Rc<dyn IdleDetector>, String> {
        let constructor = detector_constructor()?;
        let detector = Reflect::construct(&constructor, &Array::new()).map_err(interop::describe)?;
        let controller = AbortController::new().map_err(interop::describe)?;
        Ok(Rc::new(WebIdleDetector {
            detector,
            controller,
        }))
    }
}

struct WebIdleDetector {
    detector: JsValue,
    controller: AbortController,
}

impl IdleDetector for WebIdleDetector {
    fn on_change(&self, listener: Rc<dyn Fn(IdleState)>) -> Subscription {
        let detector = self.detector.clone();
        interop::listen(&self.detector, "change", move |_| {
            listener(IdleState::new(
                interop::get_string(&detector, "userState").unwrap_or_default(),
                interop::get_string(&detector, "screenState").unwrap_or_default(),
            ));
        })
    }

    fn start<'a>(&'a self, threshold_ms: u32) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let options = Object::new();
            interop::set(&options, "threshold", &JsValue::from(threshold_ms))?;
            interop::set(&options, "signal", &self.controller.signal())?;
            interop::call_async(&self.detector, "start", &[options.into()]).await?;
            Ok(())
        })
    }
}

impl Drop for WebIdleDetector {
    fn drop(&mut self) {
        self.controller.abort();
    }
}
