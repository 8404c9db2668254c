use std::rc::Rc;

use device_host::{Subscription, TimerService};
use wasm_bindgen::{closure::Closure, JsCast};

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Interval timer backed by `window.setInterval`.
pub struct WebTimerService;

impl TimerService for WebTimerService {
    fn set_interval(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> Subscription {
        let Some(window) = interop::window() else {
            return Subscription::detached();
        };
        let callback = Closure::wrap(Box::new(move || tick()) as Box<dyn FnMut()>);
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let Ok(handle) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        ) else {
            return Subscription::detached();
        };

        Subscription::new(move || {
            window.clear_interval_with_handle(handle);
            drop(callback);
        })
    }
}
