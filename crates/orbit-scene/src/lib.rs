pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::orbit::TechOrbit;
pub use api::config::{
    SceneConfig, CameraConfig, LightingConfig, CoreConfig, SatelliteConfig, MotionConfig,
    SATELLITE_COUNT,
};
pub use api::error::SceneError;
pub use api::host::{Container, RandomSource};
pub use api::types::{Color, NodeId};
pub use components::mesh::{Geometry, MeshComponent, PhongMaterial};
pub use components::node::{Node, NodeKind};
pub use components::orbit::{OrbitState, Satellite};
pub use core::frame_loop::{FrameLoop, LoopState};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use renderer::{
    PerspectiveCamera, HeadlessRenderer, Renderer, RendererOptions,
    RenderBuffer, RenderItem, MeshInstance, FrameUniforms,
};
pub use systems::animation::OrbitRig;
pub use systems::geometry::{build_geometry, MeshData, Vertex};
pub use systems::lighting::{AmbientLight, DirectionalLight, LightState};
pub use systems::render::build_render_buffer;
