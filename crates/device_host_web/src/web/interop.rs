//! Reflection glue shared by the browser adapters.

use device_host::Subscription;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, EventTarget, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn navigator() -> Option<JsValue> {
    Some(window()?.navigator().into())
}

pub fn document() -> Option<JsValue> {
    window()?.document().map(Into::into)
}

pub fn screen() -> Option<JsValue> {
    window()?.screen().ok().map(Into::into)
}

/// `key in target`, treating non-objects as having no properties.
pub fn has(target: &JsValue, key: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(key)).unwrap_or(false)
}

/// Property lookup that maps `undefined` and `null` to `None`.
pub fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

pub fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key)?.as_string()
}

pub fn get_f64(target: &JsValue, key: &str) -> Option<f64> {
    get(target, key)?.as_f64()
}

pub fn get_bool(target: &JsValue, key: &str) -> Option<bool> {
    get(target, key)?.as_bool()
}

pub fn navigator_member(key: &str) -> Result<JsValue, String> {
    let navigator = navigator().ok_or_else(|| "navigator unavailable".to_string())?;
    get(&navigator, key).ok_or_else(|| format!("navigator.{key} unavailable"))
}

pub fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(describe)
}

/// Calls `target[method](...args)` with `this` bound to `target`.
pub fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let function = get(target, method)
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| format!("`{method}` is not a function"))?;
    let args: Array = args.iter().collect();
    function.apply(target, &args).map_err(describe)
}

/// Awaits a promise, or a plain value wrapped as a resolved promise.
pub async fn settle(value: JsValue) -> Result<JsValue, String> {
    JsFuture::from(Promise::resolve(&value))
        .await
        .map_err(describe)
}

pub async fn call_async(
    target: &JsValue,
    method: &str,
    args: &[JsValue],
) -> Result<JsValue, String> {
    let pending = call(target, method, args)?;
    settle(pending).await
}

/// Renders a thrown value the way template-string interpolation would.
pub fn describe(error: JsValue) -> String {
    if let Some(text) = error.as_string() {
        return text;
    }
    get(&error, "toString")
        .and_then(|value| value.dyn_into::<Function>().ok())
        .and_then(|to_string| to_string.call0(&error).ok())
        .and_then(|text| text.as_string())
        .unwrap_or_else(|| format!("{error:?}"))
}

/// Adds a DOM event listener; the returned guard removes it.
pub fn listen(
    target: &JsValue,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Subscription {
    let Ok(target) = target.clone().dyn_into::<EventTarget>() else {
        return Subscription::detached();
    };
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        return Subscription::detached();
    }

    let event = event.to_string();
    Subscription::new(move || {
        let _ = target
            .remove_event_listener_with_callback(&event, closure.as_ref().unchecked_ref());
        drop(closure);
    })
}
