use orbit_scene::{Container, SceneError};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node, Window};
use crate::document::dom_error;

/// A page element the scene renders into.
pub struct DomContainer {
    element: HtmlElement,
    window: Window,
}

impl DomContainer {
    pub fn new(element: HtmlElement, window: Window) -> Self {
        Self { element, window }
    }

    /// Look up the container by element id.
    /// Returns `None` when there is no such element or it is not an HTML element.
    pub fn find(window: &Window, id: &str) -> Option<Self> {
        let element = window
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self::new(element, window.clone()))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Append `child` as the container's last child.
    pub fn mount(&self, child: &Node) -> Result<(), SceneError> {
        self.element
            .append_child(child)
            .map(|_| ())
            .map_err(|e| dom_error("appendChild", e))
    }
}

impl Container for DomContainer {
    fn client_width(&self) -> u32 {
        self.element.client_width().max(0) as u32
    }

    fn client_height(&self) -> u32 {
        self.element.client_height().max(0) as u32
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.window.device_pixel_ratio() as f32
    }
}
