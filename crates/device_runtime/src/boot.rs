//! Startup service worker registration.

use device_host::DeviceServices;
use leptos::logging;

use crate::config::DemoConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of [`register_service_worker`].
pub enum ServiceWorkerBoot {
    /// The worker script was registered for the configured scope.
    Registered,
    /// Registration was attempted and rejected.
    Failed(String),
    /// The browser has no service worker support.
    Unsupported,
}

/// Registers the configured service worker once. Failures are logged and never surface in the
/// output area.
pub async fn register_service_worker(
    services: &DeviceServices,
    config: &DemoConfig,
) -> ServiceWorkerBoot {
    let worker = &services.service_worker;
    if !worker.probe().is_supported() {
        logging::log!("Service Worker is not supported by this browser.");
        return ServiceWorkerBoot::Unsupported;
    }

    match worker
        .register(&config.service_worker_script, &config.service_worker_scope)
        .await
    {
        Ok(()) => {
            logging::log!(
                "Service Worker registered for scope {}",
                config.service_worker_scope
            );
            ServiceWorkerBoot::Registered
        }
        Err(err) => {
            logging::warn!("Service Worker failed to register: {err}");
            ServiceWorkerBoot::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use device_host::{
        CapabilityStatus, DeviceFuture, MemoryServiceWorkerService, ServiceWorkerService,
    };
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    struct RejectingWorker;

    impl ServiceWorkerService for RejectingWorker {
        fn probe(&self) -> CapabilityStatus {
            CapabilityStatus::Supported
        }

        fn register<'a>(
            &'a self,
            _script_url: &'a str,
            _scope: &'a str,
        ) -> DeviceFuture<'a, Result<(), String>> {
            Box::pin(async { Err("SecurityError: insecure origin".to_string()) })
        }
    }

    #[test]
    fn registers_configured_script_and_scope() {
        let worker = MemoryServiceWorkerService::default();
        let mut services = DeviceServices::unsupported();
        services.service_worker = Rc::new(worker.clone());

        let outcome = block_on(register_service_worker(&services, &DemoConfig::default()));

        assert_eq!(outcome, ServiceWorkerBoot::Registered);
        assert_eq!(
            worker.registrations(),
            vec![(
                "/pwa-devices/service-worker.js".to_string(),
                "/pwa-devices/".to_string()
            )]
        );
    }

    #[test]
    fn missing_support_skips_registration() {
        let outcome = block_on(register_service_worker(
            &DeviceServices::unsupported(),
            &DemoConfig::default(),
        ));
        assert_eq!(outcome, ServiceWorkerBoot::Unsupported);
    }

    #[test]
    fn rejection_is_reported_not_raised() {
        let mut services = DeviceServices::unsupported();
        services.service_worker = Rc::new(RejectingWorker);

        let outcome = block_on(register_service_worker(&services, &DemoConfig::default()));
        assert_eq!(
            outcome,
            ServiceWorkerBoot::Failed("SecurityError: insecure origin".to_string())
        );
    }
}
