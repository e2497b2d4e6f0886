use std::cell::RefCell;
use std::rc::Rc;
use orbit_scene::{Rng, SceneConfig, SceneError, TechOrbit};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;
use crate::container::DomContainer;
use crate::document::{dom_error, window};
use crate::webgl::WebGlRenderer;

/// State shared by the frame callback and the resize callback.
struct Shared {
    orbit: TechOrbit<WebGlRenderer>,
    container: DomContainer,
    /// Pending `requestAnimationFrame` handle, if any.
    frame_id: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drives a [`TechOrbit`] from the browser: one `requestAnimationFrame`
/// callback per display refresh plus a window `resize` listener.
///
/// wasm-bindgen cannot export generic structs, so each page crate keeps one of
/// these in a `thread_local!` (see [`export_scene!`](crate::export_scene)).
pub struct SceneRunner {
    window: Window,
    state: Rc<RefCell<Shared>>,
    frame: FrameCallback,
    resize: Closure<dyn FnMut()>,
}

impl SceneRunner {
    /// Build the scene in the element with id `container_id` and start animating.
    ///
    /// Returns `Ok(None)` when the element does not exist; nothing is created.
    pub fn mount(container_id: &str, config: SceneConfig) -> Result<Option<Self>, SceneError> {
        let window = window()?;
        let container = DomContainer::find(&window, container_id);
        let mut rng = Rng::new(config.seed.unwrap_or_else(entropy_seed));

        let orbit = TechOrbit::init(container.as_ref(), config, &mut rng, WebGlRenderer::new)?;
        let (Some(orbit), Some(container)) = (orbit, container) else {
            log::debug!("#{container_id} not found, nothing to render");
            return Ok(None);
        };

        let state = Rc::new(RefCell::new(Shared {
            orbit,
            container,
            frame_id: None,
        }));

        let resize = {
            let state = Rc::clone(&state);
            Closure::wrap(Box::new(move || {
                // Never fires inside a frame, but stay safe if it somehow does.
                let Ok(mut guard) = state.try_borrow_mut() else {
                    return;
                };
                let shared = &mut *guard;
                shared.orbit.resize(&shared.container);
            }) as Box<dyn FnMut()>)
        };

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let callback = {
            let state = Rc::clone(&state);
            let frame = Rc::clone(&frame);
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                let mut shared = state.borrow_mut();
                shared.frame_id = None;
                if !shared.orbit.is_running() {
                    return;
                }

                // Schedule the next frame before doing this one's work.
                if let Some(next) = frame.borrow().as_ref() {
                    match window.request_animation_frame(next.as_ref().unchecked_ref()) {
                        Ok(id) => shared.frame_id = Some(id),
                        Err(e) => log::error!("{}", dom_error("requestAnimationFrame", e)),
                    }
                }

                if let Err(err) = shared.orbit.tick() {
                    log::error!("frame {} failed, stopping: {err}", shared.orbit.frame_count());
                    if let Some(id) = shared.frame_id.take() {
                        let _ = window.cancel_animation_frame(id);
                    }
                }
            }) as Box<dyn FnMut()>)
        };
        *frame.borrow_mut() = Some(callback);

        let runner = Self {
            window,
            state,
            frame,
            resize,
        };
        // The canvas is already in the page; take it back out if wiring fails.
        if let Err(err) = runner.attach() {
            runner.dispose();
            return Err(err);
        }
        Ok(Some(runner))
    }

    fn attach(&self) -> Result<(), SceneError> {
        self.window
            .add_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref())
            .map_err(|e| dom_error("addEventListener(resize)", e))?;
        self.request_frame()
    }

    /// Resume the loop after [`stop`](Self::stop).
    pub fn start(&self) -> Result<(), SceneError> {
        let pending = {
            let mut shared = self.state.borrow_mut();
            shared.orbit.start();
            shared.frame_id.is_some()
        };
        if pending {
            return Ok(());
        }
        self.request_frame()
    }

    /// Stop animating and cancel the pending frame. The scene stays on screen.
    pub fn stop(&self) {
        let mut shared = self.state.borrow_mut();
        shared.orbit.stop();
        if let Some(id) = shared.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().orbit.is_running()
    }

    pub fn frame_count(&self) -> u64 {
        self.state.borrow().orbit.frame_count()
    }

    /// Stop, detach the listeners, and release GPU and DOM resources.
    pub fn dispose(self) {
        self.stop();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        // Break the callback's reference to itself.
        drop(self.frame.borrow_mut().take());
        drop(self.resize);

        match Rc::try_unwrap(self.state) {
            Ok(cell) => {
                cell.into_inner().orbit.dispose();
            }
            Err(_) => log::warn!("scene state still shared, renderer not released"),
        }
    }

    fn request_frame(&self) -> Result<(), SceneError> {
        let id = {
            let frame = self.frame.borrow();
            let Some(callback) = frame.as_ref() else {
                return Ok(());
            };
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(|e| dom_error("requestAnimationFrame", e))?
        };
        self.state.borrow_mut().frame_id = Some(id);
        Ok(())
    }
}

/// Seed for the layout's random draws when the config does not fix one.
fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}
