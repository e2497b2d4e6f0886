use orbit_scene::SceneError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

/// Wrap a rejected DOM call as a [`SceneError::Dom`].
pub fn dom_error(context: &str, value: JsValue) -> SceneError {
    let detail = value.as_string().unwrap_or_else(|| format!("{value:?}"));
    SceneError::Dom(format!("{context}: {detail}"))
}

pub fn window() -> Result<Window, SceneError> {
    web_sys::window().ok_or_else(|| SceneError::Dom("no global window".into()))
}

pub fn document() -> Result<Document, SceneError> {
    window()?
        .document()
        .ok_or_else(|| SceneError::Dom("window has no document".into()))
}

/// Run `f` once the document has been parsed.
///
/// If parsing is already done `f` runs now and its result is returned.
/// Otherwise it runs on `DOMContentLoaded`; errors at that point can only be logged.
pub fn when_document_ready<F>(f: F) -> Result<(), SceneError>
where
    F: FnOnce() -> Result<(), SceneError> + 'static,
{
    let document = document()?;
    if document.ready_state() != "loading" {
        return f();
    }

    log::debug!("document still loading, waiting for DOMContentLoaded");
    let callback = Closure::once_into_js(move || {
        if let Err(err) = f() {
            log::error!("deferred scene setup failed: {err}");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| dom_error("addEventListener(DOMContentLoaded)", e))
}
