//! Startup inputs: the `?feature=` deep link and the embedded config document.

use device_runtime::{DemoConfig, Feature};
use leptos::logging;

/// Id of the optional `<script type="application/json">` holding a [`DemoConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "device-demo-config";

/// Parses a deep-link token. Unknown tokens are logged and dropped.
pub fn feature_from_token(token: &str) -> Option<Feature> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    match token.parse::<Feature>() {
        Ok(feature) => Some(feature),
        Err(err) => {
            logging::warn!("ignoring deep link: {err}");
            None
        }
    }
}

/// Builds the config from the embedded document, falling back to defaults.
pub fn config_from_source(raw: Option<&str>) -> DemoConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DemoConfig::default();
    };
    match DemoConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("using default config: {err}");
            DemoConfig::default()
        }
    }
}

/// Reads the config embedded in the current page.
pub fn current_config() -> DemoConfig {
    #[cfg(target_arch = "wasm32")]
    {
        let raw = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());
        config_from_source(raw.as_deref())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        config_from_source(None)
    }
}
