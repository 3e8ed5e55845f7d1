use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::math::rgb_from_hex;

const GRID_SIZE: f32 = 10.0;
const GRID_DIVISIONS: u32 = 100;
const AXES_LENGTH: f32 = 5.0;

/// Points evenly spaced on a circle, starting on the +X side
pub fn regular_polygon_points(center: Vec2, amount: usize, radius: f32) -> Vec<Vec2> {
    let alpha = TAU / amount as f32;
    (0..amount)
        .map(|i| {
            let angle = alpha * i as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// One coloured line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Vec3,
}

/// Unlit line geometry used by the debug helpers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub segments: Vec<Segment>,
}

impl LineSet {
    pub fn push(&mut self, start: Vec3, end: Vec3, color: Vec3) {
        self.segments.push(Segment { start, end, color });
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Square grid on the XZ plane; the centre lines are brighter
pub fn grid_helper(size: f32, divisions: u32) -> LineSet {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;
    let center_color = rgb_from_hex(0x888888);
    let line_color = rgb_from_hex(0x444444);

    let mut lines = LineSet::default();
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i * 2 == divisions { center_color } else { line_color };
        lines.push(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), color);
        lines.push(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), color);
    }
    lines
}

/// X, Y and Z axes drawn red, green and blue
pub fn axes_helper(length: f32) -> LineSet {
    let mut lines = LineSet::default();
    lines.push(Vec3::ZERO, Vec3::X * length, Vec3::X);
    lines.push(Vec3::ZERO, Vec3::Y * length, Vec3::Y);
    lines.push(Vec3::ZERO, Vec3::Z * length, Vec3::Z);
    lines
}

pub fn default_grid() -> LineSet {
    grid_helper(GRID_SIZE, GRID_DIVISIONS)
}

pub fn default_axes() -> LineSet {
    axes_helper(AXES_LENGTH)
}
