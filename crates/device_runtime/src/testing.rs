//! Native test harness: in-memory services driven by a `LocalPool`.

use std::rc::Rc;

use device_host::DeviceServices;
use futures::executor::LocalPool;

use crate::{
    config::DemoConfig,
    dispatcher::Dispatcher,
    registry::HandlerRegistry,
    surface::{BlockId, NullSink, OutputDocument},
};

/// Inputs a test may customize before the dispatcher is built.
pub(crate) struct Fakes {
    pub(crate) services: DeviceServices,
    pub(crate) config: DemoConfig,
}

pub(crate) struct Harness {
    pub(crate) pool: LocalPool,
    pub(crate) dispatcher: Dispatcher,
}

impl Harness {
    /// Every capability absent.
    pub(crate) fn unsupported() -> Self {
        Self::with(|_| {})
    }

    /// Starts from the all-unsupported bundle and lets the test swap in fakes.
    pub(crate) fn with(configure: impl FnOnce(&mut Fakes)) -> Self {
        let mut fakes = Fakes {
            services: DeviceServices::unsupported(),
            config: DemoConfig::default(),
        };
        configure(&mut fakes);
        Self::build(fakes, HandlerRegistry::builtin())
    }

    pub(crate) fn with_registry(registry: HandlerRegistry) -> Self {
        Self::build(
            Fakes {
                services: DeviceServices::unsupported(),
                config: DemoConfig::default(),
            },
            registry,
        )
    }

    fn build(fakes: Fakes, registry: HandlerRegistry) -> Self {
        let pool = LocalPool::new();
        let dispatcher = Dispatcher::with_registry(
            fakes.services,
            fakes.config,
            Rc::new(NullSink),
            Rc::new(pool.spawner()),
            registry,
        );
        Self { pool, dispatcher }
    }

    /// Drives spawned handler tasks until they all wait on something.
    pub(crate) fn run(&mut self) {
        self.pool.run_until_stalled();
    }

    pub(crate) fn document(&self) -> OutputDocument {
        self.dispatcher.document()
    }

    pub(crate) fn text(&self) -> String {
        self.document().text_content()
    }

    pub(crate) fn button(&self, label: &str) -> BlockId {
        self.document()
            .button(label)
            .unwrap_or_else(|| panic!("no `{label}` button in {:?}", self.document()))
    }

    /// Clicks the button labelled `label` and runs resulting tasks.
    pub(crate) fn click(&mut self, label: &str) {
        let button = self.button(label);
        assert!(self.dispatcher.click(button), "`{label}` click unhandled");
        self.run();
    }
}
