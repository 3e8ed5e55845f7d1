use std::sync::Arc;

use super::error::SceneError;
use super::graph::{Node, NodeId, SceneGraph};
use super::mesh::{MeshData, MeshInstance};
use crate::loaders::{AssetPart, LoadedAsset};

/// The asset nodes the scene is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    Body,
    EyeLeft,
    EyeRight,
    Heart,
}

impl PartRole {
    pub const ALL: [PartRole; 4] = [
        PartRole::Body,
        PartRole::EyeLeft,
        PartRole::EyeRight,
        PartRole::Heart,
    ];

    /// Node name in the glTF file
    pub fn node_name(self) -> &'static str {
        match self {
            PartRole::Body => "Body",
            PartRole::EyeLeft => "eyeLeft",
            PartRole::EyeRight => "eyeRight",
            PartRole::Heart => "Heart",
        }
    }
}

/// Every role looked up in an asset, checked before the graph is touched
#[derive(Debug, Clone, Copy)]
pub struct ResolvedParts<'a> {
    pub body: &'a AssetPart,
    pub eye_left: &'a AssetPart,
    pub eye_right: &'a AssetPart,
    pub heart: &'a AssetPart,
}

impl<'a> ResolvedParts<'a> {
    pub fn resolve(asset: &'a LoadedAsset) -> Result<Self, SceneError> {
        let find = |role: PartRole| {
            asset
                .part(role.node_name())
                .ok_or(SceneError::MissingPart(role.node_name()))
        };

        let heart = find(PartRole::Heart)?;
        if heart.primitives.is_empty() {
            return Err(SceneError::EmptyPart(PartRole::Heart.node_name()));
        }

        Ok(Self {
            body: find(PartRole::Body)?,
            eye_left: find(PartRole::EyeLeft)?,
            eye_right: find(PartRole::EyeRight)?,
            heart,
        })
    }

    /// Heart template geometry shared by every heart in the scene
    pub fn heart_geometry(&self) -> Arc<MeshData> {
        Arc::clone(&self.heart.primitives[0].geometry)
    }
}

/// Role to node lookup for the instantiated ghost
#[derive(Debug, Clone)]
pub struct GhostParts {
    pub body: NodeId,
    pub eye_left: NodeId,
    pub eye_right: NodeId,
    pub heart: Arc<MeshData>,
}

/// Adds an asset part under `parent`
///
/// A single primitive becomes one mesh node. Several primitives become a
/// group holding meshes named `name`, `name_1`, `name_2` and so on.
pub fn instantiate_part(graph: &mut SceneGraph, parent: NodeId, part: &AssetPart) -> NodeId {
    let mesh_of = |index: usize| {
        let primitive = &part.primitives[index];
        MeshInstance::new(Arc::clone(&primitive.geometry), primitive.material)
    };

    match part.primitives.len() {
        0 => graph.add(parent, Node::group(&part.name).with_transform(part.transform)),
        1 => graph.add(
            parent,
            Node::mesh(&part.name, mesh_of(0)).with_transform(part.transform),
        ),
        count => {
            let group = graph.add(parent, Node::group(&part.name).with_transform(part.transform));
            for index in 0..count {
                let name = if index == 0 {
                    part.name.clone()
                } else {
                    format!("{}_{}", part.name, index)
                };
                graph.add(group, Node::mesh(name, mesh_of(index)));
            }
            group
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::AssetPrimitive;
    use crate::scene::graph::NodeKind;
    use crate::scene::mesh::Material;
    use crate::scene::Transform;
    use glam::Vec3;

    fn part(name: &str, primitives: usize) -> AssetPart {
        let geometry = Arc::new(MeshData::cube(1.0));
        AssetPart {
            name: name.to_string(),
            transform: Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            primitives: (0..primitives)
                .map(|_| AssetPrimitive {
                    geometry: Arc::clone(&geometry),
                    material: Material::default(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_resolve_complete_asset() {
        let asset = LoadedAsset::from_parts(
            PartRole::ALL.iter().map(|r| part(r.node_name(), 1)).collect(),
        );
        let resolved = ResolvedParts::resolve(&asset).unwrap();
        assert_eq!(resolved.eye_right.name, "eyeRight");
        assert_eq!(resolved.heart_geometry().triangle_count(), 12);
    }

    #[test]
    fn test_resolve_reports_missing_part() {
        let asset = LoadedAsset::from_parts(vec![part("Body", 1), part("Heart", 1)]);
        assert_eq!(
            ResolvedParts::resolve(&asset).unwrap_err(),
            SceneError::MissingPart("eyeLeft")
        );
    }

    #[test]
    fn test_resolve_rejects_empty_heart() {
        let asset = LoadedAsset::from_parts(vec![part("Heart", 0)]);
        assert_eq!(
            ResolvedParts::resolve(&asset).unwrap_err(),
            SceneError::EmptyPart("Heart")
        );
    }

    #[test]
    fn test_instantiate_single_primitive() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let id = instantiate_part(&mut graph, root, &part("Body", 1));
        assert!(matches!(graph.node(id).kind, NodeKind::Mesh(_)));
        assert_eq!(graph.node(id).transform.position.y, 1.0);
    }

    #[test]
    fn test_instantiate_multi_primitive_names() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let id = instantiate_part(&mut graph, root, &part("Body", 3));

        assert!(matches!(graph.node(id).kind, NodeKind::Group));
        let names: Vec<_> = graph
            .children(id)
            .iter()
            .map(|&c| graph.node(c).name.as_str())
            .collect();
        assert_eq!(names, ["Body", "Body_1", "Body_2"]);
    }
}
