use glam::{Mat3, Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use super::framebuffer::FrameBuffer;
use crate::scene::{Light, LineSet, Material, MeshInstance, NodeId, NodeKind, PerspectiveCamera, SceneGraph};

/// Longest line, in pixel steps, the line walker will draw
const MAX_LINE_STEPS: f32 = 8192.0;
const MIN_CLIP_W: f32 = 1e-5;

/// A light resolved into world space for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
enum LightSample {
    Hemisphere {
        sky: Vec3,
        ground: Vec3,
        intensity: f32,
    },
    Point {
        position: Vec3,
        radiance: Vec3,
        distance: f32,
        decay: f32,
    },
    Spot {
        position: Vec3,
        direction: Vec3,
        cos_cutoff: f32,
        radiance: Vec3,
        decay: f32,
    },
}

impl LightSample {
    fn from_light(light: &Light, world: &Mat4) -> Self {
        let position = world.transform_point3(Vec3::ZERO);
        match *light {
            Light::Hemisphere { sky, ground, intensity } => LightSample::Hemisphere { sky, ground, intensity },
            Light::Point {
                color,
                intensity,
                distance,
                decay,
            } => LightSample::Point {
                position,
                radiance: color * intensity,
                distance,
                decay,
            },
            Light::Spot {
                color,
                intensity,
                angle,
                decay,
                target,
            } => LightSample::Spot {
                position,
                direction: (target - position).try_normalize().unwrap_or(-Vec3::Y),
                cos_cutoff: angle.cos(),
                radiance: color * intensity,
                decay,
            },
        }
    }
}

/// Flat-shaded, depth-buffered triangle and line rasterizer
///
/// Opaque meshes are drawn first, then translucent ones blended over them,
/// then line helpers. Triangles are double sided.
#[derive(Debug, Default)]
pub struct Rasterizer {
    lights: Vec<LightSample>,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every visible node of `graph` into `target` without clearing it
    pub fn draw(&mut self, target: &mut FrameBuffer, graph: &SceneGraph, camera: &PerspectiveCamera) {
        let mut opaque: Vec<(NodeId, Mat4)> = Vec::new();
        let mut translucent: Vec<(NodeId, Mat4)> = Vec::new();
        let mut lines: Vec<(NodeId, Mat4)> = Vec::new();

        self.lights.clear();
        let lights = &mut self.lights;
        graph.visit_visible(|id, node, world| match &node.kind {
            NodeKind::Light(light) => lights.push(LightSample::from_light(light, world)),
            NodeKind::Mesh(mesh) if mesh.material.opacity() < 1.0 => translucent.push((id, *world)),
            NodeKind::Mesh(_) => opaque.push((id, *world)),
            NodeKind::Lines(_) => lines.push((id, *world)),
            NodeKind::Group => {}
        });

        let view_projection = camera.view_projection();

        for (id, world) in opaque.iter().chain(&translucent) {
            if let NodeKind::Mesh(mesh) = &graph.node(*id).kind {
                self.draw_mesh(target, mesh, world, &view_projection, camera.position);
            }
        }

        for (id, world) in &lines {
            if let NodeKind::Lines(set) = &graph.node(*id).kind {
                draw_lines(target, set, world, &view_projection);
            }
        }
    }

    fn draw_mesh(
        &self,
        target: &mut FrameBuffer,
        mesh: &MeshInstance,
        world: &Mat4,
        view_projection: &Mat4,
        eye: Vec3,
    ) {
        let geometry = &mesh.geometry;
        let normal_matrix = Mat3::from_mat4(*world).inverse().transpose();
        let opacity = mesh.material.opacity();

        let world_positions: Vec<Vec3> = geometry
            .positions
            .iter()
            .map(|&p| world.transform_point3(p))
            .collect();
        let clip: Vec<Vec4> = world_positions
            .iter()
            .map(|p| *view_projection * p.extend(1.0))
            .collect();

        for [a, b, c] in geometry.triangles() {
            let triangle = [clip[a], clip[b], clip[c]];
            if triangle.iter().any(|v| v.w <= MIN_CLIP_W) {
                continue;
            }

            let (pa, pb, pc) = (world_positions[a], world_positions[b], world_positions[c]);
            let centroid = (pa + pb + pc) / 3.0;
            let mut normal = (normal_matrix * (geometry.normals[a] + geometry.normals[b] + geometry.normals[c]))
                .try_normalize()
                .or_else(|| (pb - pa).cross(pc - pa).try_normalize())
                .unwrap_or(Vec3::Y);
            let to_eye = (eye - centroid).normalize_or_zero();
            if normal.dot(to_eye) < 0.0 {
                normal = -normal;
            }

            let color = shade(&mesh.material, centroid, normal, to_eye, &self.lights);
            fill_triangle(target, triangle, color, opacity);
        }
    }
}

/// Lambert diffuse with a Blinn-Phong highlight, plus emissive
fn shade(material: &Material, position: Vec3, normal: Vec3, to_eye: Vec3, lights: &[LightSample]) -> Vec3 {
    let roughness = material.roughness.clamp(0.05, 1.0);
    let highlight = Highlight {
        shininess: 2.0 / roughness.powi(4),
        gloss: 1.0 - roughness,
    };

    let mut diffuse = Vec3::ZERO;
    let mut specular = Vec3::ZERO;

    for light in lights {
        let (to_light, radiance) = match *light {
            LightSample::Hemisphere { sky, ground, intensity } => {
                diffuse += ground.lerp(sky, 0.5 * normal.y + 0.5) * intensity;
                continue;
            }
            LightSample::Point {
                position: light_position,
                radiance,
                distance,
                decay,
            } => {
                let offset = light_position - position;
                let d = offset.length();
                if d <= f32::EPSILON {
                    continue;
                }
                (offset / d, radiance * Light::attenuation(d, distance, decay))
            }
            LightSample::Spot {
                position: light_position,
                direction,
                cos_cutoff,
                radiance,
                decay,
            } => {
                let offset = light_position - position;
                let d = offset.length();
                if d <= f32::EPSILON || (-offset / d).dot(direction) <= cos_cutoff {
                    continue;
                }
                (offset / d, radiance * Light::attenuation(d, 0.0, decay))
            }
        };

        let (d, s) = highlight.direct(normal, to_eye, to_light, radiance);
        diffuse += d;
        specular += s;
    }

    let diffuse_color = material.color * (1.0 - 0.5 * material.metalness);
    let specular_color = Vec3::splat(0.04).lerp(material.color, material.metalness);
    diffuse_color * diffuse + specular_color * specular + material.emissive
}

#[derive(Debug, Clone, Copy)]
struct Highlight {
    shininess: f32,
    gloss: f32,
}

impl Highlight {
    /// Diffuse and specular contribution of one directional sample
    fn direct(&self, normal: Vec3, to_eye: Vec3, to_light: Vec3, radiance: Vec3) -> (Vec3, Vec3) {
        let n_dot_l = normal.dot(to_light).max(0.0);
        if n_dot_l <= 0.0 {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        let half = (to_light + to_eye).normalize_or_zero();
        let highlight = half.dot(normal).max(0.0).powf(self.shininess);
        (radiance * n_dot_l, radiance * (self.gloss * highlight * n_dot_l))
    }
}

/// Clip space to pixel x, pixel y, depth
fn to_screen(clip: Vec4, width: f32, height: f32) -> Vec3 {
    let ndc = clip.xyz() / clip.w;
    Vec3::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height, ndc.z)
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn fill_triangle(target: &mut FrameBuffer, clip: [Vec4; 3], color: Vec3, opacity: f32) {
    let (width, height) = target.dimensions();
    let (w, h) = (width as f32, height as f32);
    let [s0, s1, s2] = clip.map(|v| to_screen(v, w, h));
    let (a, b, c) = (s0.truncate(), s1.truncate(), s2.truncate());

    let area = edge(a, b, c);
    if !area.is_finite() || area.abs() < f32::EPSILON {
        return;
    }

    let min = a.min(b).min(c);
    let max = a.max(b).max(c);
    if max.x < 0.0 || max.y < 0.0 || min.x >= w || min.y >= h {
        return;
    }
    let x0 = min.x.max(0.0) as u32;
    let y0 = min.y.max(0.0) as u32;
    let x1 = (max.x.ceil() as u32).min(width - 1);
    let y1 = (max.y.ceil() as u32).min(height - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            // Dividing by the signed area makes both windings positive inside
            let w0 = edge(b, c, p) / area;
            let w1 = edge(c, a, p) / area;
            let w2 = edge(a, b, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = w0 * s0.z + w1 * s1.z + w2 * s2.z;
            if (0.0..=1.0).contains(&depth) {
                target.plot(x, y, depth, color, opacity);
            }
        }
    }
}

fn draw_lines(target: &mut FrameBuffer, lines: &LineSet, world: &Mat4, view_projection: &Mat4) {
    let (width, height) = target.dimensions();
    let (w, h) = (width as f32, height as f32);

    for segment in &lines.segments {
        let start = *view_projection * world.transform_point3(segment.start).extend(1.0);
        let end = *view_projection * world.transform_point3(segment.end).extend(1.0);
        if start.w <= MIN_CLIP_W || end.w <= MIN_CLIP_W {
            continue;
        }

        let (a, b) = (to_screen(start, w, h), to_screen(end, w, h));
        let steps = (b - a).truncate().abs().max_element().ceil().clamp(1.0, MAX_LINE_STEPS);
        for i in 0..=steps as u32 {
            let p = a.lerp(b, i as f32 / steps);
            if p.x < 0.0 || p.y < 0.0 || p.x >= w || p.y >= h || !(0.0..=1.0).contains(&p.z) {
                continue;
            }
            target.plot(p.x as u32, p.y as u32, p.z, segment.color, 1.0);
        }
    }
}
