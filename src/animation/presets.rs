use crate::scene::{NodeId, SceneGraph};

use super::oscillator::{Axis, SinAnimation};
use super::registry::{AnimationId, AnimationRegistry};

pub const BREATHE_MIN: f32 = -0.5;
pub const BREATHE_MAX: f32 = -0.55;
pub const BREATHE_DURATION: f32 = 400.0;

pub const HEART_MIN: f32 = 0.9;
pub const HEART_MAX: f32 = 1.0;
pub const HEART_DURATION: f32 = 500.0;

/// Slow vertical bob of the ghost body
pub fn register_breathe(registry: &mut AnimationRegistry, node: NodeId) -> AnimationId {
    let bob = SinAnimation::new(node)
        .with_range(BREATHE_MIN, BREATHE_MAX)
        .with_duration(BREATHE_DURATION);
    registry.register(move |time, graph| bob.apply(time, graph))
}

/// Floating heart: bobs on Y and turns about Y
pub fn register_heart(registry: &mut AnimationRegistry, node: NodeId) -> AnimationId {
    let bob = SinAnimation::new(node)
        .with_range(HEART_MIN, HEART_MAX)
        .with_duration(HEART_DURATION);
    registry.register(move |time, graph: &mut SceneGraph| {
        bob.apply(time, graph);
        graph.transform_mut(node).rotation.y = time / HEART_DURATION;
    })
}

/// Continuous spin: `rotation[axis] = time / duration`
pub fn register_rotation(
    registry: &mut AnimationRegistry,
    node: NodeId,
    axis: Axis,
    duration: f32,
) -> AnimationId {
    registry.register(move |time, graph: &mut SceneGraph| {
        axis.set(&mut graph.transform_mut(node).rotation, time / duration);
    })
}
