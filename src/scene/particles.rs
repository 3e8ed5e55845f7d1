use std::sync::Arc;

use glam::Vec3;
use rand::Rng;

use super::graph::{Node, NodeId, SceneGraph};
use super::light::Light;
use super::mesh::{Material, MeshData, MeshInstance};

pub const PARTICLE_COUNT: usize = 3;
pub const BLUE_LIGHT: u32 = 0x3282b8;

const BASE_POSITION_RANGE: f32 = 3.0;
const BASE_TIME_RANGE: f32 = 500.0;
const PARTICLE_RADIUS: f32 = 0.03;
const LIGHT_INTENSITY: f32 = 0.2;
const LIGHT_DISTANCE: f32 = 10.0;

/// Per-axis wander parameters, drawn once per particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMotion {
    pub time_range: f32,
    pub position_range: f32,
}

impl AxisMotion {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            time_range: BASE_TIME_RANGE * rng.gen_range(0.8..1.6),
            position_range: BASE_POSITION_RANGE * rng.gen_range(0.9..1.4),
        }
    }

    pub fn offset(&self, time: f32) -> f32 {
        (time / self.time_range).sin() * self.position_range
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub light: NodeId,
    /// X, Y, Z
    pub motion: [AxisMotion; 3],
}

/// Small glowing point lights drifting around the ghost
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Adds the particle lights under `parent`, each carrying a tiny sphere
    pub fn generate<R: Rng + ?Sized>(graph: &mut SceneGraph, parent: NodeId, rng: &mut R) -> Self {
        let sphere = Arc::new(MeshData::uv_sphere(PARTICLE_RADIUS, 16, 8));

        let particles = (0..PARTICLE_COUNT)
            .map(|i| {
                let light = graph.add(
                    parent,
                    Node::light(
                        format!("Particle{i}"),
                        Light::point(BLUE_LIGHT, LIGHT_INTENSITY, LIGHT_DISTANCE, 1.0),
                    ),
                );
                graph.add(
                    light,
                    Node::mesh(
                        format!("Particle{i}Mesh"),
                        MeshInstance::new(Arc::clone(&sphere), Material::basic(BLUE_LIGHT)),
                    ),
                );

                Particle {
                    light,
                    motion: [
                        AxisMotion::random(rng),
                        AxisMotion::random(rng),
                        AxisMotion::random(rng),
                    ],
                }
            })
            .collect();

        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn animate(&self, time: f32, graph: &mut SceneGraph) {
        for particle in &self.particles {
            let [x, y, z] = particle.motion;
            graph.transform_mut(particle.light).position =
                Vec3::new(x.offset(time), y.offset(time), z.offset(time));
        }
    }
}
