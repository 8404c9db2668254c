use std::{cell::RefCell, rc::Rc};

use device_host::{CapabilityStatus, DeviceServices, Subscription, WakeLockSentinel};
use leptos::logging;

use crate::{registry::CapabilityHandler, selection::Feature, session::HandlerContext};

pub(crate) struct WakeLockHandler;

const SENTINEL_KEY: &str = "wake-lock-sentinel";

type SentinelSlot = Rc<RefCell<Option<Box<dyn WakeLockSentinel>>>>;

fn on_release_click(ctx: &HandlerContext, slot: &SentinelSlot) {
    let taken = slot.borrow_mut().take();
    let Some(sentinel) = taken else {
        return;
    };

    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        let ctx = task_ctx;
        match sentinel.release().await {
            Ok(()) => {
                ctx.release_keyed(SENTINEL_KEY);
                ctx.replace_markup("Wake Lock deactivated.<br>The screen was released!");
            }
            Err(err) => {
                logging::warn!("wake lock release failed: {err}");
                ctx.replace_text(format!("Wake Lock release failed: {err}"));
            }
        }
    });
}

impl CapabilityHandler for WakeLockHandler {
    fn feature(&self) -> Feature {
        Feature::ScreenWakeLock
    }

    fn unsupported_message(&self) -> &'static str {
        "Screen Wake Lock API not supported on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.wake_lock.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let task_ctx = ctx.clone();
        ctx.spawn(async move {
            let ctx = task_ctx;
            let sentinel = match ctx.services().wake_lock.request_screen().await {
                Ok(sentinel) => sentinel,
                Err(err) => {
                    ctx.replace_text(format!("Wake Lock request failed: {err}"));
                    return;
                }
            };

            // The lock is held until released by the button or by the session ending.
            let slot: SentinelSlot = Rc::new(RefCell::new(Some(sentinel)));
            let held = Rc::clone(&slot);
            ctx.hold_keyed(
                SENTINEL_KEY,
                Subscription::new(move || drop(held.borrow_mut().take())),
            );

            ctx.replace_markup("<div>Wake Lock is active!</div>");
            let Some(button) = ctx.button("Release screen") else {
                return;
            };
            let click_ctx = ctx.clone();
            ctx.on_click(button, move || on_release_click(&click_ctx, &slot));
        });
    }
}

#[cfg(test)]
mod tests {
    use device_host::MemoryWakeLockService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    fn harness(wake_lock: &MemoryWakeLockService) -> Harness {
        let service = wake_lock.clone();
        let mut harness =
            Harness::with(move |fakes: &mut Fakes| fakes.services.wake_lock = Rc::new(service));
        harness.dispatcher.select("screen-wake-lock");
        harness.run();
        harness
    }

    #[test]
    fn lock_is_held_until_released() {
        let wake_lock = MemoryWakeLockService::default();
        let mut harness = harness(&wake_lock);
        assert_eq!(harness.text(), "Wake Lock is active!\nRelease screen");
        assert_eq!(wake_lock.held_count(), 1);

        harness.click("Release screen");
        assert_eq!(wake_lock.held_count(), 0);
        assert_eq!(
            harness.text(),
            "Wake Lock deactivated.The screen was released!"
        );
    }

    #[test]
    fn ending_the_session_releases_the_lock() {
        let wake_lock = MemoryWakeLockService::default();
        let harness = harness(&wake_lock);
        assert_eq!(wake_lock.held_count(), 1);

        harness.dispatcher.select("geolocation");
        assert_eq!(wake_lock.held_count(), 0);
    }

    #[test]
    fn lock_granted_after_switching_away_is_released() {
        let wake_lock = MemoryWakeLockService::default().deferred();
        let mut harness = harness(&wake_lock);
        assert!(harness.document().is_empty());

        harness.dispatcher.select("vibration");
        wake_lock.release_pending();
        harness.run();

        assert_eq!(wake_lock.acquired_count(), 1);
        assert_eq!(wake_lock.held_count(), 0);
        assert_eq!(
            harness.text(),
            "Vibration is not supported on this device."
        );
    }

    #[test]
    fn rejected_request_is_rendered() {
        let wake_lock = MemoryWakeLockService::default();
        wake_lock.fail_with("NotAllowedError: page is hidden");
        let harness = harness(&wake_lock);
        assert_eq!(
            harness.text(),
            "Wake Lock request failed: NotAllowedError: page is hidden"
        );
    }
}
