//! Browser (`wasm32`) implementations of [`device_host`] capability contracts.
//!
//! Most of the APIs the demo exercises are experimental or vendor-specific (`getBattery`,
//! `navigator.connection`, `IdleDetector`, `navigator.wakeLock`, badging), so the adapters under
//! `web/` reach them through `js_sys::Reflect` presence checks and method calls instead of typed
//! `web-sys` bindings. Everything browser-specific compiles only for `wasm32`; other targets get
//! the all-unsupported bundle from [`build_device_services`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host-strategy selection and the service bundle factory used by the entry layer.
pub mod adapters;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use adapters::{build_device_services, host_strategy_name};
