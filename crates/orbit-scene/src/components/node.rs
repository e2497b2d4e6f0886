use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// What a node contributes to the frame.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform node; only its children are drawn.
    Group,
    /// A drawable mesh.
    Mesh(MeshComponent),
}

/// Scene-graph node: a transform plus an optional mesh.
///
/// Parent/child links are owned by [`Scene`](crate::core::scene::Scene);
/// the builder methods here only set up the local transform.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Invisible nodes are skipped together with their subtree.
    pub visible: bool,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a transform-only node at the origin.
    pub fn group(id: NodeId) -> Self {
        Self::new(id, NodeKind::Group)
    }

    /// Create a mesh node at the origin.
    pub fn mesh(id: NodeId, mesh: MeshComponent) -> Self {
        Self::new(id, NodeKind::Mesh(mesh))
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// The mesh component, if this is a mesh node.
    pub fn mesh_component(&self) -> Option<&MeshComponent> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local transform: scale, then XYZ rotation, then translation.
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_by_default() {
        let node = Node::group(NodeId(1));
        assert_eq!(node.local_matrix(), Mat4::IDENTITY);
        assert!(node.mesh_component().is_none());
    }

    #[test]
    fn local_matrix_rotates_then_translates() {
        let node = Node::group(NodeId(1))
            .with_position(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        // +X rotated a quarter turn about Y lands on -Z, then shifted by +X.
        let p = node.local_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-6, "{p:?}");
    }

    #[test]
    fn scale_applies_before_translation() {
        let node = Node::group(NodeId(1))
            .with_position(Vec3::new(0.0, 2.0, 0.0))
            .with_scale(Vec3::splat(3.0));
        let p = node.local_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(3.0, 2.0, 0.0)).length() < 1e-6);
    }
}
