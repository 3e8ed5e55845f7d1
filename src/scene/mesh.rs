use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3;

use crate::math::{rgb_from_hex, AABB};

/// Triangle geometry shared between mesh instances
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    bounds: AABB,
}

impl MeshData {
    /// Creates geometry, generating smooth normals when none are supplied
    ///
    /// Indices are truncated to whole triangles, and any index past the end of
    /// `positions` drops its triangle.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let vertex_count = positions.len() as u32;
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| i < vertex_count))
            .flatten()
            .copied()
            .collect();

        let normals = if normals.len() == positions.len() {
            normals
        } else {
            compute_normals(&positions, &indices)
        };
        let bounds = AABB::from_points(&positions);

        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Non-indexed geometry: every three positions form a triangle
    pub fn from_triangle_list(positions: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        let indices = (0..(positions.len() / 3 * 3) as u32).collect();
        Self::new(positions, normals, indices)
    }

    /// Axis-aligned cube centred on the origin
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (-Vec3::X, Vec3::Y, -Vec3::Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (-Vec3::Y, -Vec3::Z, Vec3::X),
            (Vec3::Z, Vec3::Y, -Vec3::X),
            (-Vec3::Z, Vec3::Y, Vec3::X),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, up, right) in faces {
            let base = positions.len() as u32;
            let center = normal * h;
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(center + right * (u * h) + up * (v * h));
                normals.push(normal);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(positions, normals, indices)
    }

    /// UV sphere with `width_segments` around and `height_segments` pole to pole
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut positions = Vec::new();
        let mut normals = Vec::new();

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;
                let normal = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
                positions.push(normal * radius);
                normals.push(normal);
            }
        }

        let row = width_segments + 1;
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::new(positions, normals, indices)
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        // Area-weighted face normal
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

/// Surface parameters for the software shader; colours are linear RGB
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    /// 0 is opaque, 1 lets everything behind through
    pub transmission: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            roughness: 1.0,
            metalness: 0.0,
            transmission: 0.0,
        }
    }
}

impl Material {
    /// Lit material with the given sRGB hex colour
    pub fn standard(hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color: rgb_from_hex(hex),
            roughness,
            metalness,
            ..Default::default()
        }
    }

    /// Unlit material: renders its colour regardless of lights
    pub fn basic(hex: u32) -> Self {
        Self {
            color: Vec3::ZERO,
            emissive: rgb_from_hex(hex),
            ..Default::default()
        }
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.transmission.clamp(0.0, 1.0) * 0.8
    }
}

/// Geometry plus material, the payload of a mesh node
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub geometry: Arc<MeshData>,
    pub material: Material,
}

impl MeshInstance {
    pub fn new(geometry: Arc<MeshData>, material: Material) -> Self {
        Self { geometry, material }
    }
}
