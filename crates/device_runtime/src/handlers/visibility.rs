use std::{cell::Cell, rc::Rc};

use device_host::{
    CapabilityStatus, DeviceServices, Notice, NotificationPermission, VisibilityState,
};
use leptos::logging;

use crate::{
    registry::CapabilityHandler, selection::Feature, session::HandlerContext, surface::js_whole,
};

pub(crate) struct VisibilityHandler;

fn come_back_notice(icon: &str) -> Notice {
    Notice {
        title: "Come back, please!!!".to_string(),
        body: "Don't leave me here alone.".to_string(),
        icon: icon.to_string(),
    }
}

fn on_hidden(ctx: &HandlerContext, left_at: &Cell<Option<u64>>) {
    left_at.set(Some(ctx.services().clock.now_ms()));

    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        let ctx = task_ctx;
        let notifications = &ctx.services().notifications;
        if notifications.request_permission().await != NotificationPermission::Granted {
            return;
        }
        let notice = come_back_notice(&ctx.config().notification_icon);
        if let Err(err) = notifications.show(&notice).await {
            logging::warn!("come-back notification failed: {err}");
        }
    });
}

fn on_visible(ctx: &HandlerContext, left_at: &Cell<Option<u64>>) {
    let Some(left) = left_at.get() else {
        logging::log!("page became visible without a recorded departure");
        return;
    };
    let away_ms = ctx.services().clock.now_ms().saturating_sub(left);
    ctx.replace_markup(format!(
        "Welcome back!!!<br>You were away for {} seconds.",
        js_whole(away_ms as f64 / 1000.0)
    ));
}

impl CapabilityHandler for VisibilityHandler {
    fn feature(&self) -> Feature {
        Feature::PageVisibility
    }

    fn unsupported_message(&self) -> &'static str {
        "Page visibility not available on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.visibility.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        ctx.replace_markup("Page visibility set.<br>Please, don't leave me!");
        logging::log!("visibility: {}", ctx.services().visibility.state().as_str());

        let left_at = Rc::new(Cell::new(None));
        let listener_ctx = ctx.clone();
        ctx.hold(ctx.services().visibility.on_change(Rc::new(move |state: VisibilityState| {
            logging::log!("visibility: {}", state.as_str());
            match state {
                VisibilityState::Hidden => on_hidden(&listener_ctx, &left_at),
                VisibilityState::Visible => on_visible(&listener_ctx, &left_at),
            }
        })));
    }
}

#[cfg(test)]
mod tests {
    use device_host::{ManualClock, MemoryNotificationService, MemoryPageVisibilityService};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Fakes, Harness};

    struct Page {
        harness: Harness,
        visibility: MemoryPageVisibilityService,
        notifications: MemoryNotificationService,
        clock: ManualClock,
    }

    fn page(permission: NotificationPermission) -> Page {
        let visibility = MemoryPageVisibilityService::default();
        let notifications = MemoryNotificationService::new(permission);
        let clock = ManualClock::new(1_000_000);
        let (v, n, c) = (visibility.clone(), notifications.clone(), clock.clone());
        let harness = Harness::with(move |fakes: &mut Fakes| {
            fakes.services.visibility = Rc::new(v);
            fakes.services.notifications = Rc::new(n);
            fakes.services.clock = Rc::new(c);
        });
        harness.dispatcher.select("page-visibility");
        Page {
            harness,
            visibility,
            notifications,
            clock,
        }
    }

    #[test]
    fn leaving_notifies_and_returning_reports_time_away() {
        let mut page = page(NotificationPermission::Granted);
        assert_eq!(page.harness.text(), "Page visibility set.Please, don't leave me!");

        page.visibility.set(VisibilityState::Hidden);
        page.harness.run();
        assert_eq!(
            page.notifications.shown(),
            vec![come_back_notice("/pwa-devices/images/logo.png")]
        );

        page.clock.advance(12_600);
        page.visibility.set(VisibilityState::Visible);
        assert_eq!(
            page.harness.text(),
            "Welcome back!!!You were away for 13 seconds."
        );
    }

    #[test]
    fn denied_permission_skips_the_notification() {
        let mut page = page(NotificationPermission::Denied);
        page.visibility.set(VisibilityState::Hidden);
        page.harness.run();
        assert!(page.notifications.shown().is_empty());
    }

    #[test]
    fn visible_without_departure_keeps_the_greeting() {
        let page = page(NotificationPermission::Granted);
        page.visibility.set(VisibilityState::Visible);
        assert_eq!(page.harness.text(), "Page visibility set.Please, don't leave me!");
    }

    #[test]
    fn listener_is_released_with_the_session() {
        let page = page(NotificationPermission::Granted);
        assert_eq!(page.visibility.listener_count(), 1);
        page.harness.dispatcher.select("battery");
        assert_eq!(page.visibility.listener_count(), 0);
    }
}
