use bytemuck::{Pod, Zeroable};
use crate::components::mesh::Geometry;

/// Directional lights a backend must support per frame. Extra lights are ignored.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Per-mesh draw data, uploaded as uniforms by the backend.
/// 36 floats = 144 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Model-to-world matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for transforming normals.
    pub normal_matrix: [[f32; 4]; 4],
    /// Surface color in [0, 1].
    pub color: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 36;
}

/// One draw: which shape, and how to place and shade it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub geometry: Geometry,
    pub instance: MeshInstance,
}

/// Per-frame shared shading inputs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_projection: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    /// Number of valid entries in the light arrays.
    pub light_count: u32,
    pub background: [f32; 3],
    pub _pad0: f32,
    /// Ambient color premultiplied by intensity.
    pub ambient: [f32; 3],
    pub _pad1: f32,
    /// Unit vectors toward each light.
    pub light_directions: [[f32; 3]; MAX_DIRECTIONAL_LIGHTS],
    /// Light colors premultiplied by intensity.
    pub light_colors: [[f32; 3]; MAX_DIRECTIONAL_LIGHTS],
}

/// Everything a backend needs to draw one frame, rebuilt every frame.
pub struct RenderBuffer {
    pub items: Vec<RenderItem>,
    pub uniforms: FrameUniforms,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            uniforms: FrameUniforms::default(),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.uniforms = FrameUniforms::default();
    }

    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_instance_is_36_floats() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::FLOATS * 4);
    }

    #[test]
    fn clear_resets_items_and_uniforms() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderItem {
            geometry: Geometry::cube(1.0),
            instance: MeshInstance::default(),
        });
        buf.uniforms.light_count = 2;
        buf.clear();
        assert_eq!(buf.item_count(), 0);
        assert_eq!(buf.uniforms.light_count, 0);
    }
}
