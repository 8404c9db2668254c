//! Leptos view of the demo page.

use std::rc::Rc;

use device_host::DeviceServices;
use leptos::*;

use crate::{
    boot::register_service_worker,
    config::DemoConfig,
    dispatcher::Dispatcher,
    selection::Feature,
    spawner::BrowserSpawner,
    surface::{BlockKind, OutputBlock, OutputDocument, OutputSink},
};

#[derive(Debug, Clone, Copy)]
/// [`OutputSink`] mirroring the document into a reactive signal.
pub struct SignalSink(pub RwSignal<OutputDocument>);

impl OutputSink for SignalSink {
    fn publish(&self, document: &OutputDocument) {
        self.0.set(document.clone());
    }
}

#[component]
/// Feature selector and output area.
///
/// Registers the service worker on mount and ends the live session on unmount or `pagehide`.
pub fn DeviceDemo(
    /// Browser capability providers.
    services: DeviceServices,
    /// Handler tunables. Defaults apply when omitted.
    #[prop(optional)]
    config: Option<DemoConfig>,
    /// Feature selected on mount.
    #[prop(default = None)]
    initial_feature: Option<Feature>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let document = create_rw_signal(OutputDocument::default());
    let selected = create_rw_signal(
        initial_feature
            .map(|feature| feature.as_str().to_string())
            .unwrap_or_default(),
    );

    let boot_services = services.clone();
    let boot_config = config.clone();
    spawn_local(async move {
        register_service_worker(&boot_services, &boot_config).await;
    });

    let dispatcher = Dispatcher::new(
        services,
        config,
        Rc::new(SignalSink(document)),
        Rc::new(BrowserSpawner),
    );
    if let Some(feature) = initial_feature {
        dispatcher.select_feature(feature);
    }

    let unload_dispatcher = dispatcher.clone();
    let unload_listener = window_event_listener(ev::pagehide, move |_| {
        unload_dispatcher.shutdown();
    });
    let cleanup_dispatcher = dispatcher.clone();
    on_cleanup(move || {
        unload_listener.remove();
        cleanup_dispatcher.shutdown();
    });

    let dispatcher = store_value(dispatcher);

    view! {
        <main class="device-demo">
            <label class="device-demo-label" for="feature-selector">
                "Device feature"
            </label>
            <select
                id="feature-selector"
                prop:value=move || selected.get()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    selected.set(value.clone());
                    dispatcher.with_value(|dispatcher| dispatcher.select(&value));
                }
            >
                <option value="">"- Select -"</option>
                {Feature::ALL
                    .into_iter()
                    .map(|feature| {
                        view! { <option value=feature.as_str()>{feature.label()}</option> }
                    })
                    .collect_view()}
            </select>
            <div id="output" aria-live="polite">
                <For
                    each=move || document.get().blocks().to_vec()
                    key=|block| (block.id, block.revision)
                    let:block
                >
                    {render_block(block, dispatcher)}
                </For>
            </div>
        </main>
    }
}

fn render_block(block: OutputBlock, dispatcher: StoredValue<Dispatcher>) -> View {
    let id = block.id;
    match block.kind {
        BlockKind::Text(text) => view! { <div class="output-text">{text}</div> }.into_view(),
        BlockKind::Markup(markup) => {
            view! { <div class="output-markup" inner_html=markup></div> }.into_view()
        }
        BlockKind::Button { label, disabled } => view! {
            <button
                type="button"
                class="output-button"
                disabled=disabled
                on:click=move |_| {
                    dispatcher.with_value(|dispatcher| dispatcher.click(id));
                }
            >
                {label}
            </button>
        }
        .into_view(),
        BlockKind::Select { options, value } => view! {
            <select
                class="output-select"
                on:change=move |ev| {
                    let chosen = event_target_value(&ev);
                    dispatcher.with_value(|dispatcher| dispatcher.change(id, chosen));
                }
            >
                {options
                    .into_iter()
                    .map(|option| {
                        let selected = option.value == value;
                        view! {
                            <option value=option.value selected=selected>
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_view(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn signal_sink_mirrors_published_documents() {
        let runtime = create_runtime();
        let document = create_rw_signal(OutputDocument::default());
        let sink = SignalSink(document);

        let mut published = OutputDocument::default();
        published.replace_text("Badge set to the app.");
        sink.publish(&published);

        assert_eq!(document.get_untracked(), published);
        runtime.dispose();
    }
}
