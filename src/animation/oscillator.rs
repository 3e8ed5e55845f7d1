use glam::Vec3;

use crate::scene::{NodeId, SceneGraph};

/// Which transform vector an animation writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Property {
    #[default]
    Position,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// `sin(time / duration)` remapped from [-1, 1] into [min, max]
pub fn oscillate(time: f32, duration: f32, min: f32, max: f32) -> f32 {
    let sin = (time / duration).sin();
    let from_zero_to_one = (sin + 1.0) / 2.0;
    from_zero_to_one * (max - min) + min
}

/// Writes [`oscillate`] into one axis of a node's position or rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinAnimation {
    pub node: NodeId,
    pub property: Property,
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    pub duration: f32,
}

impl SinAnimation {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            property: Property::Position,
            axis: Axis::Y,
            min: 0.5,
            max: 1.0,
            duration: 1000.0,
        }
    }

    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.property = property;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn value(&self, time: f32) -> f32 {
        oscillate(time, self.duration, self.min, self.max)
    }

    pub fn apply(&self, time: f32, graph: &mut SceneGraph) {
        let value = self.value(time);
        let transform = graph.transform_mut(self.node);
        let target = match self.property {
            Property::Position => &mut transform.position,
            Property::Rotation => &mut transform.rotation,
        };
        self.axis.set(target, value);
    }
}
