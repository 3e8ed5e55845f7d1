use log::{debug, info};

use super::camera::PerspectiveCamera;
use super::graph::{NodeId, NodeKind, SceneGraph};
use crate::input::MousePosition;
use crate::math::{intersect_aabb, intersect_triangle};

/// Name of the glTF body primitive that also answers clicks
pub const BODY_PRIMITIVE_NAME: &str = "Body_1";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub distance: f32,
}

/// Visible meshes under the pointer ray, nearest first
///
/// Each mesh reports its nearest triangle hit. World bounds reject meshes
/// the ray cannot reach before any triangle is tested.
pub fn intersect(graph: &SceneGraph, camera: &PerspectiveCamera, pointer: MousePosition) -> Vec<PickHit> {
    let (origin, direction) = camera.ray_through(pointer.to_ndc());
    let mut hits = Vec::new();

    graph.visit_visible(|id, node, world| {
        let NodeKind::Mesh(mesh) = &node.kind else {
            return;
        };
        let geometry = &mesh.geometry;
        if intersect_aabb(origin, direction, &geometry.bounds().transformed(world)).is_none() {
            return;
        }

        let nearest = geometry
            .triangles()
            .filter_map(|corners| {
                let corners = corners.map(|i| world.transform_point3(geometry.positions[i]));
                intersect_triangle(origin, direction, corners)
            })
            .min_by(f32::total_cmp);

        if let Some(distance) = nearest {
            hits.push(PickHit { node: id, distance });
        }
    });

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// True for the body primitive or anything under a clickable node
pub fn is_clickable(graph: &SceneGraph, node: NodeId) -> bool {
    graph.node(node).name == BODY_PRIMITIVE_NAME
        || graph.ancestors(node).any(|id| graph.node(id).clickable)
}

/// Examines the farthest hit under the pointer and logs it when clickable
pub fn handle_click(graph: &SceneGraph, camera: &PerspectiveCamera, pointer: MousePosition) -> Option<NodeId> {
    let Some(hit) = intersect(graph, camera, pointer).pop() else {
        debug!("Click at ({:.2}, {:.2}) hit nothing", pointer.x, pointer.y);
        return None;
    };

    if is_clickable(graph, hit.node) {
        info!(
            "Clicked {:?} at distance {:.2}",
            graph.node(hit.node).name,
            hit.distance
        );
        Some(hit.node)
    } else {
        debug!("Click hit {:?}, not clickable", graph.node(hit.node).name);
        None
    }
}
