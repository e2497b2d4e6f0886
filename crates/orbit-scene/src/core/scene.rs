use glam::Mat4;
use crate::api::types::{Color, NodeId};
use crate::components::node::Node;
use crate::systems::lighting::LightState;

/// Scene graph: background, lights and a flat node store with parent/child links.
/// Designed for small node counts (tens, not thousands).
pub struct Scene {
    /// Clear color.
    pub background: Color,
    pub lights: LightState,
    nodes: Vec<Node>,
    /// Nodes with no parent, in insertion order.
    roots: Vec<NodeId>,
    next_id: u32,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            lights: LightState::new(),
            nodes: Vec::with_capacity(16),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node at the top level. Returns its ID.
    pub fn add(&mut self, mut node: Node) -> NodeId {
        let id = node.id;
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    /// Add a node as the last child of `parent`.
    /// Returns `None` (and drops the node) if the parent does not exist.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Option<NodeId> {
        let id = node.id;
        match self.get_mut(parent) {
            Some(parent_node) => parent_node.children.push(id),
            None => {
                log::warn!("add_child: parent {parent:?} not in scene, dropping node {id:?}");
                return None;
            }
        }
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        Some(id)
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Top-level node IDs.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// World transform of a node: its local matrix composed with every ancestor's.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.get(id)?;
        let mut world = node.local_matrix();
        let mut parent = node.parent;
        while let Some(pid) = parent {
            let p = self.get(pid)?;
            world = p.local_matrix() * world;
            parent = p.parent;
        }
        Some(world)
    }

    /// Visit every visible node depth-first, parents before children, with its
    /// world transform. Invisible nodes hide their whole subtree.
    pub fn visit_visible(&self, mut f: impl FnMut(&Node, Mat4)) {
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, Mat4::IDENTITY))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let node = match self.get(id) {
                Some(n) if n.visible => n,
                _ => continue,
            };
            let world = parent_world * node.local_matrix();
            f(node, world);
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}
