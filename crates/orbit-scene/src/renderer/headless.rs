use crate::api::error::SceneError;
use crate::core::scene::Scene;
use crate::systems::render::build_render_buffer;
use super::camera::PerspectiveCamera;
use super::instance::RenderBuffer;
use super::traits::{Renderer, RendererOptions};

/// Renderer that builds each frame's [`RenderBuffer`] but draws nothing.
/// Used for host-side tests and for inspecting what a GPU backend would receive.
#[derive(Default)]
pub struct HeadlessRenderer {
    options: RendererOptions,
    width: u32,
    height: u32,
    pixel_ratio: f32,
    buffer: RenderBuffer,
    frames: u64,
    disposed: bool,
}

impl HeadlessRenderer {
    pub fn new(options: RendererOptions) -> Self {
        Self {
            options,
            pixel_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Options the renderer was created with.
    pub fn options(&self) -> RendererOptions {
        self.options
    }

    /// The buffer built by the most recent `render` call.
    pub fn last_frame(&self) -> &RenderBuffer {
        &self.buffer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Renderer for HeadlessRenderer {
    fn backend(&self) -> &'static str {
        "headless"
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError> {
        if self.disposed {
            return Err(SceneError::Backend("render called after dispose".into()));
        }
        build_render_buffer(scene, camera, &mut self.buffer);
        self.frames += 1;
        Ok(())
    }

    fn dispose(&mut self) {
        self.buffer.clear();
        self.disposed = true;
    }
}
