//! Triangle mesh generation for the scene's primitive shapes.

use std::f32::consts::PI;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Geometry;

/// Interleaved vertex: position then normal (6 floats / 24 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    /// Byte offset of `normal` within a vertex.
    pub const NORMAL_OFFSET: usize = 3 * 4;
}

/// Indexed triangle list, counter-clockwise when viewed from outside.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate vertex and index data for a geometry description.
pub fn build_geometry(geometry: &Geometry) -> MeshData {
    match *geometry {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => build_sphere(radius, width_segments.max(3), height_segments.max(2)),
        Geometry::Cube { size } => build_cube(size),
    }
}

/// UV sphere. Rows run from the north pole (+Y) to the south pole; the
/// triangles touching each pole are emitted once instead of as degenerate quads.
fn build_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let cols = width_segments as usize + 1;
    let rows = height_segments as usize + 1;
    let mut vertices = Vec::with_capacity(cols * rows);

    for iy in 0..rows {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..cols {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;
            let normal = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            vertices.push(Vertex {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
            });
        }
    }

    let at = |iy: usize, ix: usize| (iy * cols + ix) as u16;
    let last_row = height_segments as usize - 1;
    let mut indices = Vec::with_capacity(width_segments as usize * last_row * 6);

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = at(iy, ix + 1);
            let b = at(iy, ix);
            let c = at(iy + 1, ix);
            let d = at(iy + 1, ix + 1);
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != last_row {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Cube with 4 vertices per face so each face gets a flat normal.
fn build_cube(size: f32) -> MeshData {
    let h = size / 2.0;
    // (normal, u, v) with u × v = normal, so corners listed -u-v, +u-v, +u+v, -u+v are CCW.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        let center = normal * h;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            vertices.push(Vertex {
                position: (center + u * (su * h) + v * (sv * h)).to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle must face away from the origin.
    fn assert_outward(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let p = |i: u16| Vec3::from_array(mesh.vertices[i as usize].position);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let n = (b - a).cross(c - a);
            if n.length() < 1e-9 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(n.dot(centroid) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn sphere_counts() {
        let mesh = build_geometry(&Geometry::sphere(1.0, 32, 32));
        assert_eq!(mesh.vertices.len(), 33 * 33);
        // Pole rows contribute one triangle per segment, the rest two.
        assert_eq!(mesh.triangle_count(), 32 * 31 * 2);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = build_geometry(&Geometry::sphere(2.5, 12, 8));
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 2.5).abs() < 1e-5);
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_winding_is_outward() {
        assert_outward(&build_geometry(&Geometry::sphere(1.0, 16, 12)));
    }

    #[test]
    fn sphere_indices_in_bounds() {
        let mesh = build_geometry(&Geometry::sphere(1.0, 32, 32));
        let max = mesh.vertices.len() as u16;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn cube_counts_and_extent() {
        let mesh = build_geometry(&Geometry::cube(0.5));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            for c in v.position {
                assert!((c.abs() - 0.25).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn cube_winding_is_outward() {
        let mesh = build_geometry(&Geometry::cube(1.0));
        assert_outward(&mesh);
        for tri in mesh.indices.chunks(3) {
            let n = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            let centroid: Vec3 = tri
                .iter()
                .map(|&i| Vec3::from_array(mesh.vertices[i as usize].position))
                .sum::<Vec3>()
                / 3.0;
            assert!(n.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn vertex_is_6_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::STRIDE_BYTES);
    }
}
