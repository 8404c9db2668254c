//! Handler table keyed by [`Feature`].

use std::{collections::BTreeMap, rc::Rc};

use device_host::{CapabilityStatus, DeviceServices};

use crate::{handlers, selection::Feature, session::HandlerContext};

/// One capability demo: a presence probe, a fixed fallback message and the wiring that runs
/// when the capability is present.
pub trait CapabilityHandler {
    /// Feature this handler serves.
    fn feature(&self) -> Feature;

    /// Text rendered verbatim when [`CapabilityHandler::probe`] reports unsupported.
    fn unsupported_message(&self) -> &'static str;

    /// Checks whether the capability exists. Called on every dispatch.
    fn probe(&self, services: &DeviceServices) -> CapabilityStatus;

    /// Renders controls, attaches listeners and starts async work for a supported capability.
    fn activate(&self, ctx: &HandlerContext);
}

#[derive(Clone, Default)]
/// Dispatch table from [`Feature`] to its handler.
pub struct HandlerRegistry {
    handlers: BTreeMap<Feature, Rc<dyn CapabilityHandler>>,
}

impl HandlerRegistry {
    /// Registry with the eleven built-in handlers.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for handler in handlers::builtin() {
            registry.register(handler);
        }
        registry
    }

    /// Adds `handler`, returning the one it replaced.
    pub fn register(
        &mut self,
        handler: Rc<dyn CapabilityHandler>,
    ) -> Option<Rc<dyn CapabilityHandler>> {
        self.handlers.insert(handler.feature(), handler)
    }

    /// Handler for `feature`.
    pub fn get(&self, feature: Feature) -> Option<Rc<dyn CapabilityHandler>> {
        self.handlers.get(&feature).cloned()
    }

    /// Registered features in selector order.
    pub fn features(&self) -> Vec<Feature> {
        self.handlers.keys().copied().collect()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_covers_every_feature_once() {
        let registry = HandlerRegistry::builtin();
        assert_eq!(registry.len(), Feature::ALL.len());
        assert_eq!(registry.features(), Feature::ALL.to_vec());
        for feature in Feature::ALL {
            let handler = registry.get(feature).expect("handler registered");
            assert_eq!(handler.feature(), feature);
        }
    }

    #[test]
    fn unsupported_bundle_fails_every_probe() {
        let registry = HandlerRegistry::builtin();
        let services = DeviceServices::unsupported();
        for feature in Feature::ALL {
            let handler = registry.get(feature).expect("handler registered");
            assert_eq!(handler.probe(&services), CapabilityStatus::Unsupported);
        }
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut registry = HandlerRegistry::builtin();
        let replacement = registry.get(Feature::Battery).expect("battery");
        assert!(registry.register(replacement).is_some());
        assert_eq!(registry.len(), Feature::ALL.len());
    }
}
