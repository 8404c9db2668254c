//! Capability dispatch runtime for the device demo page.
//!
//! A [`Dispatcher`] owns the output surface and the live handler session. Each selection ends the
//! previous session, clears the surface and runs exactly one [`CapabilityHandler`] from the
//! [`HandlerRegistry`]. Handlers talk to the browser only through [`device_host::DeviceServices`],
//! so everything here except [`components`] runs natively under test.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod boot;
pub mod components;
pub mod config;
pub mod dispatcher;
mod handlers;
pub mod registry;
pub mod selection;
pub mod session;
pub mod spawner;
pub mod surface;
#[cfg(test)]
mod testing;

pub use boot::{register_service_worker, ServiceWorkerBoot};
pub use components::{DeviceDemo, SignalSink};
pub use config::{ConfigError, DemoConfig};
pub use dispatcher::Dispatcher;
pub use registry::{CapabilityHandler, HandlerRegistry};
pub use selection::{Feature, UnknownFeature};
pub use session::{CancelToken, HandlerContext, HandlerState};
pub use spawner::{BrowserSpawner, LocalTask, TaskSpawner};
pub use surface::{
    escape_html, BlockId, BlockKind, NullSink, OutputBlock, OutputDocument, OutputSink,
    SelectOption,
};
