use glam::{EulerRot, Mat4, Quat, Vec3};

use super::helpers::LineSet;
use super::light::Light;
use super::mesh::MeshInstance;

/// Handle to a node in a [`SceneGraph`]
///
/// Nodes are never freed, so a handle stays valid for the life of its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform: translation, XYZ Euler rotation in radians, scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    /// Builds a transform from translation, rotation quaternion and scale
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
            scale,
        }
    }
}

/// What a node renders, if anything
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh(MeshInstance),
    Light(Light),
    Lines(LineSet),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub clickable: bool,
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
            clickable: false,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, mesh: MeshInstance) -> Self {
        Self::new(name, NodeKind::Mesh(mesh))
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    pub fn lines(name: impl Into<String>, lines: LineSet) -> Self {
        Self::new(name, NodeKind::Lines(lines))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vec3::splat(scale);
        self
    }

    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed scene tree with a single root group
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    root: NodeId,
    /// Linear background colour
    pub background: Vec3,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::group("Scene")],
            root: NodeId(0),
            background: Vec3::ZERO,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root always exists
        false
    }

    /// Inserts `node` as the last child of `parent`
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// True when `ancestor` is `node` or lies on its parent chain
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// `node` followed by each of its parents up to the root
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |id| self.nodes[id.0].parent)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First node in insertion order carrying `name`
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeId)
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        self.ancestors(id)
            .fold(Mat4::IDENTITY, |acc, ancestor| self.nodes[ancestor.0].transform.matrix() * acc)
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Depth-first walk over visible nodes with their world matrices
    ///
    /// An invisible node hides its whole subtree.
    pub fn visit_visible(&self, mut visit: impl FnMut(NodeId, &Node, &Mat4)) {
        let mut stack = vec![(self.root, Mat4::IDENTITY)];

        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }

            let world = parent_world * node.transform.matrix();
            visit(id, node, &world);

            // Reverse so children are visited in insertion order
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }
    }
}
