use glam::{Mat4, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or a zero box for no points
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(&first) = points.first() else {
            return Self::new(Vec3::ZERO, Vec3::ZERO);
        };

        points.iter().skip(1).fold(Self::new(first, first), |acc, &p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box around this box after applying `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        Self::from_points(&corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_new() {
        let min = Vec3::new(0.0, 0.0, 0.0);
        let max = Vec3::new(1.0, 1.0, 1.0);
        let aabb = AABB::new(min, max);
        assert_eq!(aabb.min, min);
        assert_eq!(aabb.max, max);
    }

    #[test]
    fn test_aabb_center() {
        let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = AABB::from_points(&[
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 0.0, 0.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_from_no_points() {
        let aabb = AABB::from_points(&[]);
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::ZERO);
    }

    #[test]
    fn test_aabb_union_contained() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        let aabb2 = AABB::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, aabb1.min);
        assert_eq!(union.max, aabb1.max);
    }

    #[test]
    fn test_aabb_transformed_translation_and_scale() {
        let unit = AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let moved = unit.transformed(&matrix);
        assert!((moved.min - Vec3::new(9.0, -1.0, -1.0)).length() < 1e-5);
        assert!((moved.max - Vec3::new(11.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_aabb_transformed_rotation_grows_box() {
        let unit = AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let matrix = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let rotated = unit.transformed(&matrix);
        assert!(rotated.max.x > 0.7);
        assert!((rotated.max.y - 0.5).abs() < 1e-5);
    }
}
