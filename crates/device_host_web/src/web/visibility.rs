use std::rc::Rc;

use device_host::{CapabilityStatus, PageVisibilityService, Subscription, VisibilityState};

use super::interop;

fn current_state() -> VisibilityState {
    interop::document()
        .and_then(|document| interop::get_string(&document, "visibilityState"))
        .map_or(VisibilityState::Visible, |token| VisibilityState::from_token(&token))
}

#[derive(Debug, Clone, Copy, Default)]
/// Visibility adapter backed by `document.visibilityState`.
pub struct WebPageVisibilityService;

impl PageVisibilityService for WebPageVisibilityService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::document().is_some_and(|document| interop::has(&document, "visibilityState")),
        )
    }

    fn state(&self) -> VisibilityState {
        current_state()
    }

    fn on_change(&self, listener: Rc<dyn Fn(VisibilityState)>) -> Subscription {
        match interop::document() {
            Some(document) => {
                interop::listen(&document, "visibilitychange", move |_| listener(current_state()))
            }
            None => Subscription::detached(),
        }
    }
}
