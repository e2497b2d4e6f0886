use crate::api::types::Color;

/// Shape description. Backends turn these into vertex data via
/// [`build_geometry`](crate::systems::geometry::build_geometry) and may cache
/// the result per distinct value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere centered on the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Axis-aligned cube centered on the origin.
    Cube { size: f32 },
}

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn cube(size: f32) -> Self {
        Self::Cube { size }
    }
}

/// Lit surface with a Blinn-Phong specular highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    pub color: Color,
    /// Specular exponent (default: 30.0).
    pub shininess: f32,
}

impl PhongMaterial {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            shininess: 30.0,
        }
    }
}

/// Geometry + material pair carried by mesh nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: PhongMaterial,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: PhongMaterial) -> Self {
        Self { geometry, material }
    }
}
