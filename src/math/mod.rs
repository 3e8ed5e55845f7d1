mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::{linear_to_srgb, rgb_from_hex, srgb_to_linear};
pub use ray::{intersect_aabb, intersect_triangle};
