use std::{cell::Cell, rc::Rc};

use device_host::{CapabilityStatus, DeviceServices, IdleState, Subscription};
use leptos::logging;

use crate::{
    registry::CapabilityHandler,
    selection::Feature,
    session::HandlerContext,
    surface::{escape_html, BlockId},
};

pub(crate) struct IdleHandler;

const DETECTOR_KEY: &str = "idle-detector";
const CLOCK_KEY: &str = "idle-clock";

fn request_permission(ctx: &HandlerContext, message: BlockId) {
    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        let ctx = task_ctx;
        match ctx.services().idle.request_permission().await {
            Ok(state) => ctx.set_text(message, format!("Permission: {state}")),
            Err(err) => ctx.set_text(message, format!("Permission request failed: {err}")),
        }
    });
}

/// Creates and starts a detector. `attempts` keeps a late failure from releasing a newer one.
fn start_listening(
    ctx: &HandlerContext,
    start: BlockId,
    message: BlockId,
    attempts: &Rc<Cell<u64>>,
) {
    let detector = match ctx.services().idle.create_detector() {
        Ok(detector) => detector,
        Err(err) => {
            ctx.set_text(message, format!("Idle detection failed: {err}"));
            return;
        }
    };

    let listener_ctx = ctx.clone();
    let changes = detector.on_change(Rc::new(move |state: IdleState| {
        logging::log!("idle change: {state:?}");
        listener_ctx.append_markup(
            message,
            &format!(
                "<div>Idle change: user <b>{}</b>, screen <b>{}</b>.</div>",
                escape_html(&state.user),
                escape_html(&state.screen)
            ),
        );
    }));
    let held = Rc::clone(&detector);
    ctx.hold_keyed(
        DETECTOR_KEY,
        Subscription::new(move || {
            drop(changes);
            drop(held);
        }),
    );

    let ticket = attempts.get().wrapping_add(1);
    attempts.set(ticket);
    let attempts = Rc::clone(attempts);
    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        let ctx = task_ctx;
        match detector.start(ctx.config().idle_threshold_ms).await {
            Ok(()) => {
                logging::log!("idle detection started");
                ctx.set_disabled(start, true);
            }
            Err(err) => {
                if attempts.get() == ticket {
                    ctx.release_keyed(DETECTOR_KEY);
                }
                ctx.set_text(message, format!("Idle detection failed: {err}"));
            }
        }
    });
}

/// Counts seconds on the clock button. Pressing again restarts from zero.
fn start_clock(ctx: &HandlerContext, clock: BlockId) {
    ctx.set_label(clock, "Counting");

    let seconds = Cell::new(0_u32);
    let tick_ctx = ctx.clone();
    let tick = Rc::new(move || {
        let elapsed = seconds.get() + 1;
        seconds.set(elapsed);
        tick_ctx.set_label(clock, format!("{elapsed} seconds"));
    });
    let period = ctx.config().clock_period_ms;
    ctx.hold_keyed(CLOCK_KEY, ctx.services().timer.set_interval(period, tick));
}

impl CapabilityHandler for IdleHandler {
    fn feature(&self) -> Feature {
        Feature::IdleDetection
    }

    fn unsupported_message(&self) -> &'static str {
        "IdleDetector not supported on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.idle.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let (Some(permission), Some(start), Some(message), Some(clock)) = (
            ctx.button("Request Permission"),
            ctx.button("Start Listening"),
            ctx.text(""),
            ctx.button("Clock"),
        ) else {
            return;
        };

        let click_ctx = ctx.clone();
        ctx.on_click(permission, move || request_permission(&click_ctx, message));
        let click_ctx = ctx.clone();
        let attempts = Rc::new(Cell::new(0_u64));
        ctx.on_click(start, move || {
            start_listening(&click_ctx, start, message, &attempts)
        });
        let click_ctx = ctx.clone();
        ctx.on_click(clock, move || start_clock(&click_ctx, clock));
    }
}

#[cfg(test)]
mod tests {
    use device_host::{ManualTimerService, MemoryIdleDetectionService};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    fn harness(idle: &MemoryIdleDetectionService, timer: &ManualTimerService) -> Harness {
        let (idle, timer) = (idle.clone(), timer.clone());
        let harness = Harness::with(move |fakes: &mut Fakes| {
            fakes.services.idle = Rc::new(idle);
            fakes.services.timer = Rc::new(timer);
        });
        harness.dispatcher.select("idle-detection");
        harness
    }

    #[test]
    fn permission_state_is_shown() {
        let idle = MemoryIdleDetectionService::default();
        idle.set_permission("denied");
        let mut harness = harness(&idle, &ManualTimerService::default());
        harness.click("Request Permission");

        assert_eq!(
            harness.text(),
            "Request Permission\nStart Listening\nPermission: denied\nClock"
        );
    }

    #[test]
    fn listening_disables_start_and_appends_changes() {
        let idle = MemoryIdleDetectionService::default();
        let mut harness = harness(&idle, &ManualTimerService::default());
        let start = harness.button("Start Listening");
        harness.click("Start Listening");

        assert_eq!(idle.started_with(), vec![60_000]);
        let disabled = harness
            .document()
            .buttons()
            .into_iter()
            .find(|(id, _, _)| *id == start)
            .map(|(_, _, disabled)| disabled);
        assert_eq!(disabled, Some(true));

        idle.emit(IdleState::new("idle", "locked"));
        idle.emit(IdleState::new("active", "unlocked"));
        assert!(harness.text().contains(
            "Idle change: user idle, screen locked.Idle change: user active, screen unlocked."
        ));

        harness.dispatcher.select("vibration");
        assert_eq!(idle.listener_count(), 0);
    }

    #[test]
    fn failed_start_reports_and_releases_the_detector() {
        let idle = MemoryIdleDetectionService::default();
        idle.fail_start_with("NotAllowedError: Idle detection permission denied");
        let mut harness = harness(&idle, &ManualTimerService::default());
        harness.click("Start Listening");

        assert!(harness
            .text()
            .contains("Idle detection failed: NotAllowedError: Idle detection permission denied"));
        assert_eq!(idle.listener_count(), 0);
        assert!(harness.document().buttons().iter().all(|(_, _, disabled)| !disabled));
    }

    #[test]
    fn late_start_failure_keeps_the_newer_detector() {
        let idle = MemoryIdleDetectionService::default();
        let mut harness = harness(&idle, &ManualTimerService::default());
        let start = harness.button("Start Listening");

        idle.fail_start_with("NotAllowedError: Idle detection permission denied");
        assert!(harness.dispatcher.click(start));
        idle.clear_start_failure();
        assert!(harness.dispatcher.click(start));
        harness.run();

        assert_eq!(idle.created_count(), 2);
        assert_eq!(idle.started_with(), vec![60_000]);
        assert_eq!(idle.listener_count(), 1);

        idle.emit(IdleState::new("idle", "locked"));
        assert!(harness
            .text()
            .contains("Idle change: user idle, screen locked."));
    }

    #[test]
    fn clock_counts_and_restarts() {
        let timer = ManualTimerService::default();
        let mut harness = harness(&MemoryIdleDetectionService::default(), &timer);

        harness.click("Clock");
        assert!(harness.document().button("Counting").is_some());
        timer.fire();
        timer.fire();
        assert!(harness.document().button("2 seconds").is_some());

        harness.click("2 seconds");
        assert_eq!(timer.active_count(), 1);
        timer.fire();
        assert!(harness.document().button("1 seconds").is_some());

        harness.dispatcher.shutdown();
        assert_eq!(timer.active_count(), 0);
    }
}
