pub mod camera;
pub mod headless;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{PerspectiveCamera, CameraUniform};
pub use headless::HeadlessRenderer;
pub use instance::{MeshInstance, FrameUniforms, RenderBuffer, RenderItem, MAX_DIRECTIONAL_LIGHTS};
pub use traits::{Renderer, RendererOptions};
