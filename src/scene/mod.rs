pub mod builder;
pub mod camera;
pub mod error;
pub mod graph;
pub mod helpers;
pub mod light;
pub mod mesh;
pub mod particles;
pub mod parts;
pub mod picking;

pub use builder::{BuildStage, SceneBuilder};
pub use camera::PerspectiveCamera;
pub use error::SceneError;
pub use graph::{Node, NodeId, NodeKind, SceneGraph, Transform};
pub use helpers::{LineSet, Segment};
pub use light::Light;
pub use mesh::{Material, MeshData, MeshInstance};
pub use particles::ParticleSystem;
pub use parts::{GhostParts, PartRole};

use crate::animation::AnimationRegistry;
use crate::config::SceneFlags;
use crate::render::BloomSettings;

/// Everything one frame reads and writes
///
/// Optional members are filled in as the scene builder progresses.
pub struct SceneContext {
    pub graph: SceneGraph,
    pub camera: PerspectiveCamera,
    pub animations: AnimationRegistry,
    pub particles: Option<ParticleSystem>,
    pub ghost_group: Option<NodeId>,
    pub parts: Option<GhostParts>,
    pub flags: SceneFlags,
    pub bloom: BloomSettings,
}

impl SceneContext {
    /// Both eye nodes, once the asset is in
    pub fn eyes(&self) -> Option<[NodeId; 2]> {
        self.parts.as_ref().map(|p| [p.eye_left, p.eye_right])
    }
}
