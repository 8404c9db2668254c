use std::{cell::Cell, rc::Rc};

use device_host::{CapabilityStatus, DeviceServices, PermissionState};
use leptos::logging;

use crate::{
    registry::CapabilityHandler,
    selection::Feature,
    session::HandlerContext,
    surface::{escape_html, BlockId, BlockKind, SelectOption},
};

pub(crate) struct PermissionsHandler;

const STATUS_KEY: &str = "permission-status";
const PROMPT: &str = "Select a permission above.";

/// Queries `name` and observes its status. `generation` drops answers to superseded queries.
fn query(ctx: &HandlerContext, message: BlockId, name: String, generation: Rc<Cell<u64>>) {
    let ticket = generation.get() + 1;
    generation.set(ticket);
    ctx.release_keyed(STATUS_KEY);

    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        let ctx = task_ctx;
        let outcome = ctx.services().permissions.query(&name).await;
        if generation.get() != ticket {
            return;
        }
        let status = match outcome {
            Ok(status) => status,
            Err(err) => {
                ctx.set_text(message, format!("Permission query failed: {err}"));
                return;
            }
        };

        let shown_name = escape_html(
            &status
                .name()
                .filter(|reported| !reported.is_empty())
                .unwrap_or(name),
        );
        ctx.set_markup(
            message,
            format!("State for <b>{shown_name}</b>: {}", status.state().as_str()),
        );

        let listener_ctx = ctx.clone();
        ctx.hold_keyed(
            STATUS_KEY,
            status.on_change(Rc::new(move |state: PermissionState| {
                logging::log!("permission {shown_name} changed: {}", state.as_str());
                listener_ctx.append_markup(
                    message,
                    &format!(
                        "<div>Changed state for <b>{shown_name}</b>: {}</div>",
                        state.as_str()
                    ),
                );
            })),
        );
    });
}

impl CapabilityHandler for PermissionsHandler {
    fn feature(&self) -> Feature {
        Feature::Permissions
    }

    fn unsupported_message(&self) -> &'static str {
        "Permission API not available on this device."
    }

    fn probe(&self, services: &DeviceServices) -> CapabilityStatus {
        services.permissions.probe()
    }

    fn activate(&self, ctx: &HandlerContext) {
        let options = std::iter::once(SelectOption::new("", "- Select -"))
            .chain(
                ctx.config()
                    .permission_names
                    .iter()
                    .map(|name| SelectOption::new(name.as_str(), name.as_str())),
            )
            .collect();
        let (Some(select), Some(message)) = (
            ctx.write(|document| {
                document.append(BlockKind::Select {
                    options,
                    value: String::new(),
                })
            }),
            ctx.text(PROMPT),
        ) else {
            return;
        };

        let generation = Rc::new(Cell::new(0_u64));
        let change_ctx = ctx.clone();
        ctx.on_change(select, move |name: String| {
            change_ctx.write(|document| document.set_select_value(select, name.as_str()));
            if name.is_empty() {
                generation.set(generation.get() + 1);
                change_ctx.release_keyed(STATUS_KEY);
                change_ctx.set_text(message, PROMPT);
            } else {
                query(&change_ctx, message, name, Rc::clone(&generation));
            }
        });
    }
}
