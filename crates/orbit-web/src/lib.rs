pub mod container;
pub mod document;
pub mod runner;
pub mod webgl;

pub use container::DomContainer;
pub use document::{dom_error, when_document_ready};
pub use runner::SceneRunner;
pub use webgl::WebGlRenderer;
pub use orbit_scene;

/// Generate the `#[wasm_bindgen]` exports for a page scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - `scene_init`, `scene_init_with_config`, `scene_start`, `scene_stop`,
///   `scene_dispose`, `scene_is_running`, `scene_frame_count`
///
/// Control exports are no-ops until a scene is mounted, and stay no-ops if the
/// container element was missing.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// orbit_web::export_scene!("3d-container", "tech-orbit");
/// ```
///
/// # Arguments
///
/// - `$container_id`: id of the element the scene is mounted into
/// - `$scene_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_scene {
    ($container_id:literal, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&$crate::SceneRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow().as_ref().map(f))
        }

        fn to_js_error(err: $crate::orbit_scene::SceneError) -> JsError {
            JsError::new(&err.to_string())
        }

        /// Mount with the default configuration once the document is ready.
        #[wasm_bindgen]
        pub fn scene_init() -> Result<(), JsError> {
            scene_init_with_config("{}")
        }

        /// Mount with a JSON `SceneConfig`; missing fields take their defaults.
        #[wasm_bindgen]
        pub fn scene_init_with_config(json: &str) -> Result<(), JsError> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = $crate::orbit_scene::SceneConfig::from_json(json).map_err(to_js_error)?;
            $crate::when_document_ready(move || {
                let Some(runner) = $crate::SceneRunner::mount($container_id, config)? else {
                    return Ok(());
                };
                let previous = RUNNER.with(|cell| cell.borrow_mut().replace(runner));
                if let Some(previous) = previous {
                    previous.dispose();
                }
                log::info!("{}: mounted into #{}", $scene_name, $container_id);
                Ok(())
            })
            .map_err(to_js_error)
        }

        #[wasm_bindgen]
        pub fn scene_start() -> Result<(), JsError> {
            with_runner(|r| r.start()).unwrap_or(Ok(())).map_err(to_js_error)
        }

        #[wasm_bindgen]
        pub fn scene_stop() {
            with_runner(|r| r.stop());
        }

        #[wasm_bindgen]
        pub fn scene_dispose() {
            if let Some(runner) = RUNNER.with(|cell| cell.borrow_mut().take()) {
                runner.dispose();
                log::info!("{}: disposed", $scene_name);
            }
        }

        #[wasm_bindgen]
        pub fn scene_is_running() -> bool {
            with_runner(|r| r.is_running()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn scene_frame_count() -> f64 {
            with_runner(|r| r.frame_count() as f64).unwrap_or(0.0)
        }
    };
}
