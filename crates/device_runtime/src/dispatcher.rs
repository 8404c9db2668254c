//! Capability dispatcher.
//!
//! Owns the output surface and at most one live session. The view forwards selector changes and
//! output-control interactions here; everything else happens inside handlers.

use std::{cell::RefCell, rc::Rc};

use device_host::DeviceServices;
use leptos::logging;

use crate::{
    config::DemoConfig,
    registry::HandlerRegistry,
    selection::Feature,
    session::{HandlerState, Session, Surface},
    spawner::TaskSpawner,
    surface::{BlockId, OutputDocument, OutputSink},
};

struct DispatcherInner {
    services: DeviceServices,
    config: Rc<DemoConfig>,
    registry: HandlerRegistry,
    surface: Surface,
    spawner: Rc<dyn TaskSpawner>,
    session: RefCell<Option<Session>>,
}

#[derive(Clone)]
/// Entry point for selector and output-control events.
pub struct Dispatcher {
    inner: Rc<DispatcherInner>,
}

impl Dispatcher {
    /// Creates a dispatcher over the built-in handlers.
    pub fn new(
        services: DeviceServices,
        config: DemoConfig,
        sink: Rc<dyn OutputSink>,
        spawner: Rc<dyn TaskSpawner>,
    ) -> Self {
        Self::with_registry(services, config, sink, spawner, HandlerRegistry::builtin())
    }

    /// Creates a dispatcher over a custom handler table.
    pub fn with_registry(
        services: DeviceServices,
        config: DemoConfig,
        sink: Rc<dyn OutputSink>,
        spawner: Rc<dyn TaskSpawner>,
        registry: HandlerRegistry,
    ) -> Self {
        Self {
            inner: Rc::new(DispatcherInner {
                services,
                config: Rc::new(config),
                registry,
                surface: Surface::new(sink),
                spawner,
                session: RefCell::new(None),
            }),
        }
    }

    /// Handles a selector value: ends the live session, clears the output and runs the matching
    /// handler. Values outside the feature set are logged and ignored.
    pub fn select(&self, value: &str) {
        self.end_session();
        self.inner.surface.write(OutputDocument::clear);

        match value.parse::<Feature>() {
            Ok(feature) => self.activate(feature),
            Err(err) => logging::warn!("ignoring selection: {err}"),
        }
    }

    /// [`Dispatcher::select`] for an already parsed feature.
    pub fn select_feature(&self, feature: Feature) {
        self.end_session();
        self.inner.surface.write(OutputDocument::clear);
        self.activate(feature);
    }

    /// Routes a click on an output control. Returns whether the live session handled it.
    pub fn click(&self, control: BlockId) -> bool {
        let callback = self
            .inner
            .session
            .borrow()
            .as_ref()
            .and_then(|session| session.click_callback(control));
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Routes a value change on an output control. Returns whether the live session handled it.
    pub fn change(&self, control: BlockId, value: impl Into<String>) -> bool {
        let callback = self
            .inner
            .session
            .borrow()
            .as_ref()
            .and_then(|session| session.change_callback(control));
        match callback {
            Some(callback) => {
                callback(value.into());
                true
            }
            None => false,
        }
    }

    /// Ends the live session, if any. Called on page unload.
    pub fn shutdown(&self) {
        self.end_session();
    }

    /// Feature of the live session.
    pub fn active_feature(&self) -> Option<Feature> {
        self.inner.session.borrow().as_ref().map(Session::feature)
    }

    /// Handler state of the live session.
    pub fn handler_state(&self) -> Option<HandlerState> {
        self.inner.session.borrow().as_ref().map(Session::state)
    }

    /// Copy of the current output document.
    pub fn document(&self) -> OutputDocument {
        self.inner.surface.snapshot()
    }

    fn activate(&self, feature: Feature) {
        let Some(handler) = self.inner.registry.get(feature) else {
            logging::warn!("no handler registered for `{feature}`");
            return;
        };

        let session = Session::open(
            feature,
            self.inner.surface.clone(),
            self.inner.services.clone(),
            Rc::clone(&self.inner.config),
            Rc::clone(&self.inner.spawner),
        );
        let ctx = session.context().clone();
        *self.inner.session.borrow_mut() = Some(session);

        let status = handler.probe(&self.inner.services);
        logging::log!("{feature}: {}", status.as_str());
        if status.is_supported() {
            self.set_state(HandlerState::Active);
            handler.activate(&ctx);
        } else {
            self.set_state(HandlerState::Unsupported);
            ctx.replace_text(handler.unsupported_message());
        }
    }

    fn set_state(&self, state: HandlerState) {
        if let Some(session) = self.inner.session.borrow().as_ref() {
            session.set_state(state);
        }
    }

    fn end_session(&self) {
        let previous = self.inner.session.borrow_mut().take();
        if let Some(session) = previous {
            session.end();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use device_host::{
        BatteryChange, BatteryStatus, MemoryBatteryService, MemoryVibrationService,
        VibrationPattern,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        registry::CapabilityHandler,
        session::HandlerContext,
        testing::{Fakes, Harness},
    };

    #[test]
    fn every_feature_clears_and_runs_one_handler() {
        let harness = Harness::unsupported();
        for feature in Feature::ALL {
            harness.dispatcher.select(feature.as_str());
            assert_eq!(harness.dispatcher.active_feature(), Some(feature));
            assert_eq!(
                harness.dispatcher.handler_state(),
                Some(HandlerState::Unsupported)
            );
            assert_eq!(harness.document().blocks().len(), 1);
        }
    }

    #[test]
    fn unsupported_messages_are_verbatim() {
        let harness = Harness::unsupported();
        let expected = [
            (Feature::Battery, "Battery API not supported on this device."),
            (
                Feature::NetworkInfo,
                "Network information not available on this device.",
            ),
            (
                Feature::Fullscreen,
                "Fullscreen not available or enabled on this device.",
            ),
            (
                Feature::ScreenOrientation,
                "Screen orientation is not available on this device.",
            ),
            (Feature::Vibration, "Vibration is not supported on this device."),
            (Feature::Badging, "Badge API not available on this device."),
            (
                Feature::PageVisibility,
                "Page visibility not available on this device.",
            ),
            (
                Feature::IdleDetection,
                "IdleDetector not supported on this device.",
            ),
            (
                Feature::ScreenWakeLock,
                "Screen Wake Lock API not supported on this device.",
            ),
            (
                Feature::Permissions,
                "Permission API not available on this device.",
            ),
            (
                Feature::Geolocation,
                "Geolocation API not available on this device.",
            ),
        ];
        for (feature, message) in expected {
            harness.dispatcher.select_feature(feature);
            assert_eq!(harness.document().text_content(), message);
        }
    }

    #[test]
    fn unknown_selection_clears_and_is_ignored() {
        let harness = Harness::unsupported();
        harness.dispatcher.select("vibration");
        harness.dispatcher.select("aaaa");

        assert!(harness.document().is_empty());
        assert_eq!(harness.dispatcher.active_feature(), None);
        assert_eq!(harness.dispatcher.handler_state(), None);
    }

    #[test]
    fn single_vibration_click_vibrates_once() {
        let vibration = MemoryVibrationService::default();
        let harness = Harness::with(|fakes: &mut Fakes| {
            fakes.services.vibration = Rc::new(vibration.clone());
        });
        harness.dispatcher.select("vibration");
        assert_eq!(
            harness.dispatcher.handler_state(),
            Some(HandlerState::Active)
        );

        let single = harness.button("Single Vibration");
        assert!(harness.dispatcher.click(single));
        assert_eq!(vibration.requests(), vec![VibrationPattern::single(200)]);
    }

    #[test]
    fn controls_of_ended_sessions_are_inert() {
        let vibration = MemoryVibrationService::default();
        let harness = Harness::with(|fakes: &mut Fakes| {
            fakes.services.vibration = Rc::new(vibration.clone());
        });
        harness.dispatcher.select("vibration");
        let single = harness.button("Single Vibration");

        harness.dispatcher.select("battery");
        assert!(!harness.dispatcher.click(single));
        assert!(vibration.requests().is_empty());
    }

    #[test]
    fn reselecting_rerenders_from_scratch() {
        let battery = MemoryBatteryService::new(BatteryStatus::default());
        let mut harness = Harness::with(|fakes: &mut Fakes| {
            fakes.services.battery = Rc::new(battery.clone());
        });
        harness.dispatcher.select("battery");
        harness.run();
        let first = harness.document();

        harness.dispatcher.select("battery");
        assert!(harness.document().is_empty());
        harness.run();

        assert_eq!(battery.request_count(), 2);
        assert_eq!(battery.listener_count(), 4);
        assert_eq!(harness.document().text_content(), first.text_content());
        assert_ne!(harness.document().blocks()[0].id, first.blocks()[0].id);
    }

    #[test]
    fn switching_selection_releases_listeners() {
        let battery = MemoryBatteryService::new(BatteryStatus::default());
        let mut harness = Harness::with(|fakes: &mut Fakes| {
            fakes.services.battery = Rc::new(battery.clone());
        });
        harness.dispatcher.select("battery");
        harness.run();
        assert_eq!(battery.listener_count(), 4);

        harness.dispatcher.select("vibration");
        assert_eq!(battery.listener_count(), 0);

        battery.update(
            BatteryStatus {
                charging: true,
                ..BatteryStatus::default()
            },
            BatteryChange::Charging,
        );
        assert_eq!(
            harness.document().text_content(),
            "Vibration is not supported on this device."
        );
    }

    #[test]
    fn superseded_battery_request_does_not_overwrite_newer_output() {
        let battery = MemoryBatteryService::new(BatteryStatus::default()).deferred();
        let mut harness = Harness::with(|fakes: &mut Fakes| {
            fakes.services.battery = Rc::new(battery.clone());
        });
        harness.dispatcher.select("battery");
        harness.run();
        harness.dispatcher.select("vibration");

        battery.release_pending();
        harness.run();

        assert_eq!(
            harness.document().text_content(),
            "Vibration is not supported on this device."
        );
        assert_eq!(battery.listener_count(), 0);
    }

    #[test]
    fn shutdown_ends_the_live_session() {
        let battery = MemoryBatteryService::new(BatteryStatus::default());
        let mut harness = Harness::with(|fakes: &mut Fakes| {
            fakes.services.battery = Rc::new(battery.clone());
        });
        harness.dispatcher.select("battery");
        harness.run();

        harness.dispatcher.shutdown();
        assert_eq!(battery.listener_count(), 0);
        assert_eq!(harness.dispatcher.active_feature(), None);
    }

    struct CountingHandler {
        probes: Rc<Cell<usize>>,
        activations: Rc<Cell<usize>>,
    }

    impl CapabilityHandler for CountingHandler {
        fn feature(&self) -> Feature {
            Feature::Badging
        }

        fn unsupported_message(&self) -> &'static str {
            "unused"
        }

        fn probe(&self, _services: &DeviceServices) -> device_host::CapabilityStatus {
            self.probes.set(self.probes.get() + 1);
            device_host::CapabilityStatus::Supported
        }

        fn activate(&self, ctx: &HandlerContext) {
            self.activations.set(self.activations.get() + 1);
            ctx.text("counted");
        }
    }

    #[test]
    fn probe_runs_on_every_dispatch() {
        let probes = Rc::new(Cell::new(0));
        let activations = Rc::new(Cell::new(0));
        let mut registry = HandlerRegistry::default();
        registry.register(Rc::new(CountingHandler {
            probes: Rc::clone(&probes),
            activations: Rc::clone(&activations),
        }));
        let harness = Harness::with_registry(registry);

        harness.dispatcher.select("badging");
        harness.dispatcher.select("badging");
        harness.dispatcher.select("battery");

        assert_eq!(probes.get(), 2);
        assert_eq!(activations.get(), 2);
        assert!(harness.document().is_empty());
    }
}
