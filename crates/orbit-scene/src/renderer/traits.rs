//! Renderer contract between the scene core and drawing backends.
//!
//! The core never touches a GPU API. Backends (WebGL2 in `orbit-web`, the
//! headless recorder used by tests) implement [`Renderer`] and turn the scene
//! into pixels, usually via
//! [`build_render_buffer`](crate::systems::render::build_render_buffer).

use crate::api::error::SceneError;
use crate::core::scene::Scene;
use super::camera::PerspectiveCamera;

/// Creation-time options for a backend's drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererOptions {
    /// Request a multisampled surface (default: true).
    pub antialias: bool,
    /// Request an alpha channel in the surface (default: false).
    pub alpha: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            antialias: true,
            alpha: false,
        }
    }
}

/// Renderer trait for drawing backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct CanvasRenderer { /* ... */ }
///
/// impl Renderer for CanvasRenderer {
///     fn backend(&self) -> &'static str { "canvas2d" }
///     fn set_pixel_ratio(&mut self, ratio: f32) { /* resize backing store */ }
///     fn pixel_ratio(&self) -> f32 { self.ratio }
///     fn set_size(&mut self, width: u32, height: u32) { /* ... */ }
///     fn size(&self) -> (u32, u32) { (self.width, self.height) }
///     fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError> {
///         // Build the render buffer and draw it...
///         Ok(())
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "webgl2", "headless").
    fn backend(&self) -> &'static str;

    /// Physical pixels per CSS pixel used for the backing store.
    fn set_pixel_ratio(&mut self, ratio: f32);

    fn pixel_ratio(&self) -> f32;

    /// Resize the output surface, in CSS pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output size in CSS pixels.
    fn size(&self) -> (u32, u32);

    /// Backing-store size in physical pixels.
    fn drawing_buffer_size(&self) -> (u32, u32) {
        let (width, height) = self.size();
        let ratio = self.pixel_ratio();
        (
            (width as f32 * ratio).round() as u32,
            (height as f32 * ratio).round() as u32,
        )
    }

    /// Draw the scene as seen from the camera.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError>;

    /// Release GPU or DOM resources. The renderer must not be used afterwards.
    fn dispose(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Renderer for Fixed {
        fn backend(&self) -> &'static str {
            "fixed"
        }
        fn set_pixel_ratio(&mut self, _ratio: f32) {}
        fn pixel_ratio(&self) -> f32 {
            1.5
        }
        fn set_size(&mut self, _width: u32, _height: u32) {}
        fn size(&self) -> (u32, u32) {
            (801, 600)
        }
        fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), SceneError> {
            Ok(())
        }
    }

    #[test]
    fn default_options_antialias_without_alpha() {
        let options = RendererOptions::default();
        assert!(options.antialias);
        assert!(!options.alpha);
    }

    #[test]
    fn drawing_buffer_scales_and_rounds() {
        assert_eq!(Fixed.drawing_buffer_size(), (1202, 900));
    }
}
