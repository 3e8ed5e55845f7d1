use glam::Vec3;

use super::graph::{Node, NodeId, SceneGraph};
use crate::math::rgb_from_hex;

pub const SPOT_COLOR: u32 = 0xb1e1ff;
pub const FILL_COLOR: u32 = 216285;
pub const SKY_COLOR: u32 = 0xb1e1ff; // light blue
pub const GROUND_COLOR: u32 = 0xb97a20; // brownish orange

/// Light sources; positions come from the owning node's world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Spot {
        color: Vec3,
        intensity: f32,
        /// Half-angle of the cone in radians
        angle: f32,
        decay: f32,
        target: Vec3,
    },
    Point {
        color: Vec3,
        intensity: f32,
        /// Range cut-off, 0 for unbounded
        distance: f32,
        decay: f32,
    },
    Hemisphere {
        sky: Vec3,
        ground: Vec3,
        intensity: f32,
    },
}

impl Light {
    pub fn spot(hex: u32, intensity: f32, angle: f32, decay: f32) -> Self {
        Light::Spot {
            color: rgb_from_hex(hex),
            intensity,
            angle,
            decay,
            target: Vec3::ZERO,
        }
    }

    pub fn point(hex: u32, intensity: f32, distance: f32, decay: f32) -> Self {
        Light::Point {
            color: rgb_from_hex(hex),
            intensity,
            distance,
            decay,
        }
    }

    pub fn hemisphere(sky: u32, ground: u32, intensity: f32) -> Self {
        Light::Hemisphere {
            sky: rgb_from_hex(sky),
            ground: rgb_from_hex(ground),
            intensity,
        }
    }

    /// Distance falloff for positional lights
    pub fn attenuation(distance_to: f32, cutoff: f32, decay: f32) -> f32 {
        let range = if cutoff > 0.0 {
            (1.0 - (distance_to / cutoff).powi(4)).clamp(0.0, 1.0).powi(2)
        } else {
            1.0
        };
        range / distance_to.powf(decay).max(0.01)
    }
}

/// Adds the fixed rig: a spot key light, a point fill and a hemisphere base
pub fn build_lights(graph: &mut SceneGraph) -> Vec<NodeId> {
    let root = graph.root();

    let spot = graph.add(
        root,
        Node::light("SpotLight", Light::spot(SPOT_COLOR, 0.5, 0.5, 1.0))
            .with_position(Vec3::new(20.0, 5.0, 0.0)),
    );
    let fill = graph.add(
        root,
        Node::light("PointLight", Light::point(FILL_COLOR, 3.1, 0.0, 1.0))
            .with_position(Vec3::new(-2.37, -18.15, 20.48)),
    );
    let base = graph.add(
        root,
        Node::light("HemisphereLight", Light::hemisphere(SKY_COLOR, GROUND_COLOR, 1.0)),
    );

    vec![spot, fill, base]
}
