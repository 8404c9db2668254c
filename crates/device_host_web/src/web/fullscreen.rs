use device_host::{CapabilityStatus, DeviceFuture, FullscreenService};

use super::interop;

#[derive(Debug, Clone, Copy, Default)]
/// Fullscreen adapter for the document element.
pub struct WebFullscreenService;

impl FullscreenService for WebFullscreenService {
    fn probe(&self) -> CapabilityStatus {
        let Some(document) = interop::document() else {
            return CapabilityStatus::Unsupported;
        };
        CapabilityStatus::from_present(
            interop::has(&document, "fullscreenElement")
                && interop::has(&document, "exitFullscreen")
                && interop::get_bool(&document, "fullscreenEnabled").unwrap_or(false),
        )
    }

    fn is_fullscreen(&self) -> bool {
        interop::document()
            .and_then(|document| interop::get(&document, "fullscreenElement"))
            .is_some()
    }

    fn request_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let document = interop::document().ok_or_else(|| "document unavailable".to_string())?;
            let element = interop::get(&document, "documentElement")
                .ok_or_else(|| "document element unavailable".to_string())?;
            interop::call_async(&element, "requestFullscreen", &[]).await?;
            Ok(())
        })
    }

    fn exit_fullscreen<'a>(&'a self) -> DeviceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let document = interop::document().ok_or_else(|| "document unavailable".to_string())?;
            interop::call_async(&document, "exitFullscreen", &[]).await?;
            Ok(())
        })
    }
}
