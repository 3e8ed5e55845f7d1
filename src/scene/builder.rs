use std::fmt;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use log::{debug, info};
use rand::Rng;

use super::camera::PerspectiveCamera;
use super::error::SceneError;
use super::graph::{Node, NodeId, SceneGraph};
use super::helpers::{default_axes, default_grid, regular_polygon_points};
use super::light::build_lights;
use super::mesh::{Material, MeshData, MeshInstance};
use super::parts::{instantiate_part, GhostParts, ResolvedParts};
use super::particles::ParticleSystem;
use super::SceneContext;
use crate::animation::{register_breathe, register_rotation, AnimationRegistry, Axis};
use crate::config::SceneFlags;
use crate::loaders::LoadedAsset;
use crate::render::BloomSettings;

pub const GHOST_GROUP_NAME: &str = "Ghost";
pub const NIMBUS_NAME: &str = "Nimbus";
pub const HEART_COLOR: u32 = 0xfc5185;
pub const NIMBUS_HEART_COUNT: usize = 12;
pub const NIMBUS_RADIUS: f32 = 0.65;
pub const NIMBUS_HEIGHT: f32 = 2.05;

const HEART_ROUGHNESS: f32 = 0.35;
const HEART_METALNESS: f32 = 0.55;
const NIMBUS_HEART_SIZE: f32 = 0.04;
const NIMBUS_HEART_SPIN: f32 = 300.0;
const NIMBUS_SPIN: f32 = 3000.0;
const FRONT_HEART_SIZE: f32 = 0.18;
const FRONT_HEART_POSITION: Vec3 = Vec3::new(1.4, 0.05, 0.25);

/// Setup progress; each stage can only be entered from the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStage {
    Uninitialized,
    Constructed,
    AssetRequested,
    AssetLoaded,
    Decorated,
    Running,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Uninitialized => "uninitialized",
            BuildStage::Constructed => "constructed",
            BuildStage::AssetRequested => "asset requested",
            BuildStage::AssetLoaded => "asset loaded",
            BuildStage::Decorated => "decorated",
            BuildStage::Running => "running",
        };
        f.write_str(name)
    }
}

/// Builds the [`SceneContext`] step by step
///
/// The context exists from `construct` on, so the render loop can run while
/// the asset is still loading.
pub struct SceneBuilder {
    flags: SceneFlags,
    stage: BuildStage,
    context: Option<SceneContext>,
}

impl SceneBuilder {
    pub fn new(flags: SceneFlags) -> Self {
        Self {
            flags,
            stage: BuildStage::Uninitialized,
            context: None,
        }
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    pub fn context(&self) -> Option<&SceneContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut SceneContext> {
        self.context.as_mut()
    }

    pub fn into_context(self) -> Option<SceneContext> {
        self.context
    }

    /// Camera, lights, particles and helpers
    pub fn construct<R: Rng + ?Sized>(&mut self, aspect: f32, rng: &mut R) -> Result<(), SceneError> {
        if self.stage != BuildStage::Uninitialized {
            return Err(SceneError::InvalidTransition {
                from: self.stage,
                to: BuildStage::Constructed,
            });
        }

        let mut graph = SceneGraph::new();
        graph.background = Vec3::ZERO;
        let root = graph.root();

        if self.flags.debug_helpers {
            graph.add(root, Node::lines("GridHelper", default_grid()));
            graph.add(root, Node::lines("AxesHelper", default_axes()));
        }

        let particles = self
            .flags
            .particles
            .then(|| ParticleSystem::generate(&mut graph, root, rng));

        build_lights(&mut graph);

        info!(
            "Scene constructed: {} nodes, particles {}, helpers {}",
            graph.len(),
            if particles.is_some() { "on" } else { "off" },
            if self.flags.debug_helpers { "on" } else { "off" }
        );

        self.context = Some(SceneContext {
            graph,
            camera: PerspectiveCamera::ghost_view(aspect),
            animations: AnimationRegistry::new(),
            particles,
            ghost_group: None,
            parts: None,
            flags: self.flags,
            bloom: BloomSettings::default(),
        });
        self.stage = BuildStage::Constructed;
        Ok(())
    }

    /// Marks the asset as in flight; the caller starts the loader
    pub fn request_asset(&mut self) -> Result<(), SceneError> {
        self.advance(BuildStage::AssetRequested)?;
        self.stage = BuildStage::AssetRequested;
        Ok(())
    }

    /// Adds the ghost body and eyes and starts it breathing
    ///
    /// The asset is validated first; on error the scene is left unchanged
    /// and the stage stays at `AssetRequested`.
    pub fn on_asset_loaded(&mut self, asset: &LoadedAsset) -> Result<(), SceneError> {
        let ctx = self.advance(BuildStage::AssetLoaded)?;
        let resolved = ResolvedParts::resolve(asset)?;

        let root = ctx.graph.root();
        let ghost = ctx.graph.add(root, Node::group(GHOST_GROUP_NAME).clickable());
        let body = instantiate_part(&mut ctx.graph, ghost, resolved.body);
        let eye_left = instantiate_part(&mut ctx.graph, ghost, resolved.eye_left);
        let eye_right = instantiate_part(&mut ctx.graph, ghost, resolved.eye_right);

        register_breathe(&mut ctx.animations, ghost);

        ctx.ghost_group = Some(ghost);
        ctx.parts = Some(GhostParts {
            body,
            eye_left,
            eye_right,
            heart: resolved.heart_geometry(),
        });

        info!("Ghost added with {} asset triangles", asset.triangle_count());
        self.stage = BuildStage::AssetLoaded;
        Ok(())
    }

    /// Front heart and the spinning nimbus above the ghost
    pub fn decorate(&mut self) -> Result<(), SceneError> {
        let from = self.stage;
        let ctx = self.advance(BuildStage::Decorated)?;
        let (Some(ghost), Some(parts)) = (ctx.ghost_group, ctx.parts.as_ref()) else {
            return Err(SceneError::InvalidTransition {
                from,
                to: BuildStage::Decorated,
            });
        };
        let geometry = Arc::clone(&parts.heart);
        let material = Material::standard(HEART_COLOR, HEART_ROUGHNESS, HEART_METALNESS);
        let root = ctx.graph.root();

        ctx.graph.add(
            root,
            heart_node("Heart", &geometry, material, FRONT_HEART_POSITION, FRONT_HEART_SIZE),
        );

        let nimbus = ctx.graph.add(ghost, Node::group(NIMBUS_NAME));
        for (i, point) in regular_polygon_points(Vec2::ZERO, NIMBUS_HEART_COUNT, NIMBUS_RADIUS)
            .into_iter()
            .enumerate()
        {
            let heart = ctx.graph.add(
                nimbus,
                heart_node(
                    format!("NimbusHeart{i}"),
                    &geometry,
                    material,
                    Vec3::new(point.x, NIMBUS_HEIGHT, point.y),
                    NIMBUS_HEART_SIZE,
                ),
            );
            register_rotation(&mut ctx.animations, heart, Axis::Y, NIMBUS_HEART_SPIN);
        }
        register_rotation(&mut ctx.animations, nimbus, Axis::Y, NIMBUS_SPIN);

        debug!("Decorated: {} animations registered", ctx.animations.len());
        self.stage = BuildStage::Decorated;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), SceneError> {
        self.advance(BuildStage::Running)?;
        self.stage = BuildStage::Running;
        info!("Scene running");
        Ok(())
    }

    /// Checks `to` directly follows the current stage and returns the context
    fn advance(&mut self, to: BuildStage) -> Result<&mut SceneContext, SceneError> {
        let from = self.stage;
        if next_stage(from) != Some(to) {
            return Err(SceneError::InvalidTransition { from, to });
        }
        self.context
            .as_mut()
            .ok_or(SceneError::InvalidTransition { from, to })
    }
}

fn next_stage(stage: BuildStage) -> Option<BuildStage> {
    match stage {
        BuildStage::Uninitialized => Some(BuildStage::Constructed),
        BuildStage::Constructed => Some(BuildStage::AssetRequested),
        BuildStage::AssetRequested => Some(BuildStage::AssetLoaded),
        BuildStage::AssetLoaded => Some(BuildStage::Decorated),
        BuildStage::Decorated => Some(BuildStage::Running),
        BuildStage::Running => None,
    }
}

fn heart_node(
    name: impl Into<String>,
    geometry: &Arc<MeshData>,
    material: Material,
    position: Vec3,
    size: f32,
) -> Node {
    Node::mesh(name, MeshInstance::new(Arc::clone(geometry), material))
        .with_position(position)
        .with_uniform_scale(size)
}

/// Ids of the nodes the nimbus ring is made of, in creation order
pub fn nimbus_hearts(ctx: &SceneContext) -> Vec<NodeId> {
    ctx.graph
        .find_by_name(NIMBUS_NAME)
        .map(|nimbus| ctx.graph.children(nimbus).to_vec())
        .unwrap_or_default()
}
