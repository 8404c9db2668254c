use device_host::{
    CapabilityStatus, DeviceFuture, GeoPosition, GeolocationService, PositionListener,
    Subscription,
};
use js_sys::{Function, Promise};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::interop;

fn read_position(position: &JsValue) -> Result<GeoPosition, String> {
    let coords = interop::get(position, "coords")
        .ok_or_else(|| "position has no coordinates".to_string())?;
    Ok(GeoPosition {
        latitude: interop::get_f64(&coords, "latitude").unwrap_or(f64::NAN),
        longitude: interop::get_f64(&coords, "longitude").unwrap_or(f64::NAN),
        accuracy: interop::get_f64(&coords, "accuracy").unwrap_or(f64::NAN),
    })
}

/// `GeolocationPositionError.message`, falling back to the generic rendering.
fn read_error(error: JsValue) -> String {
    interop::get_string(&error, "message").unwrap_or_else(|| interop::describe(error))
}

#[derive(Debug, Clone, Copy, Default)]
/// Geolocation adapter backed by `navigator.geolocation`.
pub struct WebGeolocationService;

impl GeolocationService for WebGeolocationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::from_present(
            interop::navigator().is_some_and(|navigator| interop::has(&navigator, "geolocation")),
        )
    }

    fn current_position<'a>(&'a self) -> DeviceFuture<'a, Result<GeoPosition, String>> {
        Box::pin(async move {
            let geolocation = interop::navigator_member("geolocation")?;
            let mut dispatch_error = None;
            let pending = Promise::new(&mut |resolve: Function, reject: Function| {
                if let Err(err) = interop::call(
                    &geolocation,
                    "getCurrentPosition",
                    &[resolve.into(), reject.into()],
                ) {
                    dispatch_error = Some(err);
                }
            });
            if let Some(err) = dispatch_error {
                return Err(err);
            }
            let position = JsFuture::from(pending).await.map_err(read_error)?;
            read_position(&position)
        })
    }

    fn watch_position(&self, listener: PositionListener) -> Subscription {
        let Ok(geolocation) = interop::navigator_member("geolocation") else {
            return Subscription::detached();
        };

        let on_fix = {
            let listener = listener.clone();
            Closure::wrap(Box::new(move |position: JsValue| listener(read_position(&position)))
                as Box<dyn FnMut(JsValue)>)
        };
        let on_error = Closure::wrap(
            Box::new(move |error: JsValue| listener(Err(read_error(error))))
                as Box<dyn FnMut(JsValue)>,
        );

        let watch_id = match interop::call(
            &geolocation,
            "watchPosition",
            &[
                on_fix.as_ref().unchecked_ref::<Function>().clone().into(),
                on_error.as_ref().unchecked_ref::<Function>().clone().into(),
            ],
        ) {
            Ok(id) => id,
            Err(_) => return Subscription::detached(),
        };

        Subscription::new(move || {
            let _ = interop::call(&geolocation, "clearWatch", &[watch_id]);
            drop(on_fix);
            drop(on_error);
        })
    }
}
