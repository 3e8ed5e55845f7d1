use glam::Vec3;

use super::AABB;

/// Slab test of a ray against a box
///
/// Returns the distance along `dir` to the first hit, or the exit distance when
/// the origin is inside the box. `None` on a miss or a box behind the ray.
pub fn intersect_aabb(origin: Vec3, dir: Vec3, bounds: &AABB) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    // Near-zero components become huge reciprocals instead of dividing by zero
    let inv = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_dir = Vec3::new(inv(dir.x), inv(dir.y), inv(dir.z));

    let t0 = (bounds.min - origin) * inv_dir;
    let t1 = (bounds.max - origin) * inv_dir;

    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some(if t_near < 0.0 { t_far } else { t_near })
}

/// Möller-Trumbore ray/triangle test, hitting both faces
///
/// Returns the distance along `dir` to the hit point.
pub fn intersect_triangle(origin: Vec3, dir: Vec3, [v0, v1, v2]: [Vec3; 3]) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);

    // Parallel to the triangle plane
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab() -> AABB {
        AABB::new(Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0))
    }

    #[test]
    fn test_intersect_aabb_hit() {
        let t = intersect_aabb(Vec3::ZERO, Vec3::X, &slab()).expect("ray should hit");
        assert!((t - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_intersect_aabb_miss() {
        let bounds = AABB::new(Vec3::new(5.0, 2.0, 2.0), Vec3::new(10.0, 3.0, 3.0));
        assert!(intersect_aabb(Vec3::ZERO, Vec3::X, &bounds).is_none());
    }

    #[test]
    fn test_intersect_aabb_behind() {
        assert!(intersect_aabb(Vec3::ZERO, -Vec3::X, &slab()).is_none());
    }

    #[test]
    fn test_intersect_aabb_inside_returns_exit() {
        let t = intersect_aabb(Vec3::new(7.0, 0.0, 0.0), Vec3::X, &slab()).expect("inside hit");
        assert!((t - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_intersect_aabb_axis_parallel_ray() {
        // Zero x/z components exercise the epsilon path
        let bounds = AABB::new(Vec3::new(-1.0, 3.0, -1.0), Vec3::new(1.0, 4.0, 1.0));
        let t = intersect_aabb(Vec3::ZERO, Vec3::Y, &bounds).expect("vertical hit");
        assert!((t - 3.0).abs() < 0.01);
    }

    fn floor() -> [Vec3; 3] {
        [Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 1.0)]
    }

    #[test]
    fn test_intersect_triangle_hit_from_either_side() {
        let down = intersect_triangle(Vec3::new(-0.5, 2.0, -0.5), -Vec3::Y, floor()).expect("hit");
        assert!((down - 2.0).abs() < 1e-5);

        let up = intersect_triangle(Vec3::new(-0.5, -3.0, -0.5), Vec3::Y, floor()).expect("hit");
        assert!((up - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_intersect_triangle_outside_edge() {
        // Inside the bounding square, past the hypotenuse
        assert!(intersect_triangle(Vec3::new(0.6, 2.0, 0.6), -Vec3::Y, floor()).is_none());
    }

    #[test]
    fn test_intersect_triangle_behind_and_parallel() {
        assert!(intersect_triangle(Vec3::new(-0.5, 2.0, -0.5), Vec3::Y, floor()).is_none());
        assert!(intersect_triangle(Vec3::new(-2.0, 0.0, -0.5), Vec3::X, floor()).is_none());
    }
}
