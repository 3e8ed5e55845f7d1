use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::scene::{Material, MeshData, Transform};

/// One glTF primitive: geometry and its material
#[derive(Debug, Clone)]
pub struct AssetPrimitive {
    pub geometry: Arc<MeshData>,
    pub material: Material,
}

/// A named node of the asset with its local transform
#[derive(Debug, Clone)]
pub struct AssetPart {
    pub name: String,
    pub transform: Transform,
    pub primitives: Vec<AssetPrimitive>,
}

/// Named parts pulled out of a glTF scene, in traversal order
#[derive(Debug, Clone, Default)]
pub struct LoadedAsset {
    pub parts: Vec<AssetPart>,
}

impl LoadedAsset {
    pub fn from_parts(parts: Vec<AssetPart>) -> Self {
        Self { parts }
    }

    /// First part carrying `name`
    pub fn part(&self, name: &str) -> Option<&AssetPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn triangle_count(&self) -> usize {
        self.parts
            .iter()
            .flat_map(|p| &p.primitives)
            .map(|p| p.geometry.triangle_count())
            .sum()
    }
}

/// Loads a glTF file from disk
pub fn load_gltf_file(path: impl AsRef<Path>) -> Result<LoadedAsset> {
    let path = path.as_ref();
    info!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) =
        ::gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    from_document(&document, &buffers)
}

/// Loads a glTF asset from memory; external buffers must be data URIs
pub fn load_gltf_slice(bytes: &[u8]) -> Result<LoadedAsset> {
    let (document, buffers, _images) =
        ::gltf::import_slice(bytes).context("Failed to parse glTF data")?;

    from_document(&document, &buffers)
}

/// Loads `path` on a worker thread and hands the result to `on_complete`
///
/// The callback runs on the worker thread, so it should only forward the
/// result (for example through an event loop proxy).
pub fn spawn_load<F>(path: PathBuf, on_complete: F) -> std::io::Result<JoinHandle<()>>
where
    F: FnOnce(Result<LoadedAsset>) + Send + 'static,
{
    std::thread::Builder::new()
        .name("asset-loader".into())
        .spawn(move || on_complete(load_gltf_file(&path)))
}

fn from_document(document: &::gltf::Document, buffers: &[::gltf::buffer::Data]) -> Result<LoadedAsset> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("glTF file has no scene")?;

    let mut parts = Vec::new();
    for node in scene.nodes() {
        collect_node(&node, buffers, &mut parts)?;
    }

    let asset = LoadedAsset { parts };
    info!(
        "glTF loaded: {} named parts, {} triangles",
        asset.parts.len(),
        asset.triangle_count()
    );
    Ok(asset)
}

/// Records every named node, depth first
fn collect_node(
    node: &::gltf::Node,
    buffers: &[::gltf::buffer::Data],
    parts: &mut Vec<AssetPart>,
) -> Result<()> {
    if let Some(name) = node.name() {
        let (translation, rotation, scale) = node.transform().decomposed();
        let transform = Transform::from_trs(
            Vec3::from_array(translation),
            Quat::from_array(rotation),
            Vec3::from_array(scale),
        );

        let primitives = match node.mesh() {
            Some(mesh) => read_primitives(&mesh, buffers)?,
            None => Vec::new(),
        };

        debug!("  Part {:?}: {} primitive(s)", name, primitives.len());
        parts.push(AssetPart {
            name: name.to_string(),
            transform,
            primitives,
        });
    }

    for child in node.children() {
        collect_node(&child, buffers, parts)?;
    }

    Ok(())
}

fn read_primitives(
    mesh: &::gltf::Mesh,
    buffers: &[::gltf::buffer::Data],
) -> Result<Vec<AssetPrimitive>> {
    let mut primitives = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != ::gltf::mesh::Mode::Triangles {
            warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data[..]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(Vec3::from_array)
            .collect();

        let normals: Vec<Vec3> = reader
            .read_normals()
            .map(|normals| normals.map(Vec3::from_array).collect())
            .unwrap_or_default();

        let geometry = match reader.read_indices() {
            Some(indices) => MeshData::new(positions, normals, indices.into_u32().collect()),
            None => MeshData::from_triangle_list(positions, normals),
        };

        let material = primitive.material();
        let pbr = material.pbr_metallic_roughness();
        let [r, g, b, _] = pbr.base_color_factor();

        primitives.push(AssetPrimitive {
            geometry: Arc::new(geometry),
            material: Material {
                color: Vec3::new(r, g, b),
                emissive: Vec3::from_array(material.emissive_factor()),
                roughness: pbr.roughness_factor(),
                metalness: pbr.metallic_factor(),
                transmission: 0.0,
            },
        });
    }

    Ok(primitives)
}
