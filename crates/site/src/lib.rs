mod launch;
mod web_app;

pub use launch::{config_from_source, current_config, feature_from_token, CONFIG_ELEMENT_ID};
pub use web_app::{DemoEntry, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
