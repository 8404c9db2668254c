use device_host_web::build_device_services;
use device_runtime::DeviceDemo;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::launch::{current_config, feature_from_token};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="PWA Devices" />
        <Meta name="description" content="Device Web APIs behind a single selector." />

        <Router>
            <Routes>
                <Route path="/*any" view=DemoEntry />
            </Routes>
        </Router>
    }
}

#[component]
pub fn DemoEntry() -> impl IntoView {
    let query = use_query_map();
    let initial_feature = query.with_untracked(|map| {
        map.get("feature")
            .and_then(|token| feature_from_token(token))
    });

    view! {
        <DeviceDemo
            services=build_device_services()
            config=current_config()
            initial_feature=initial_feature
        />
    }
}
