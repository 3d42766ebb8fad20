//! Importer hand-off
//!
//! An external loader decodes a model file and hands the engine an
//! [`ImportedScene`]: a node tree with raw local matrices, flat mesh and
//! material lists, and tick-stamped animation channels. The types derive
//! serde so the hand-off can also travel as JSON.
//!
//! [`import_scene`] turns that description into a [`Scene`] plus an
//! [`Animator`] already loaded with one ticker per animated node.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationClip, Animator, Binder, KeyframeTrack, NodeChannel};
use crate::errors::{Result, TesseraError};
use crate::resources::material::{DEFAULT_DIFFUSE_MAP, Material};
use crate::resources::mesh::Mesh;
use crate::scene::{NodeHandle, Scene};
use crate::settings::EngineSettings;

/// Element order of [`ImportedNode::matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixLayout {
    /// Rows first; translation in elements 3, 7 and 11.
    #[default]
    RowMajor,
    /// Columns first; translation in elements 12, 13 and 14.
    ColumnMajor,
}

fn identity_matrix() -> [f32; 16] {
    Mat4::IDENTITY.to_cols_array()
}

fn opaque_white() -> [f32; 4] {
    [1.0; 4]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedNode {
    pub name: String,
    #[serde(default = "identity_matrix")]
    pub matrix: [f32; 16],
    #[serde(default)]
    pub layout: MatrixLayout,
    /// Indices into [`ImportedScene::meshes`].
    #[serde(default)]
    pub meshes: Vec<usize>,
    #[serde(default)]
    pub children: Vec<ImportedNode>,
}

impl ImportedNode {
    /// The local matrix in the engine's column-major layout.
    pub fn local_matrix(&self) -> Result<Mat4> {
        if let Some(v) = self.matrix.iter().find(|v| !v.is_finite()) {
            return Err(TesseraError::InvalidTransform {
                node: self.name.clone(),
                reason: format!("matrix contains {v}"),
            });
        }
        let matrix = Mat4::from_cols_array(&self.matrix);
        Ok(match self.layout {
            MatrixLayout::RowMajor => matrix.transpose(),
            MatrixLayout::ColumnMajor => matrix,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedMesh {
    #[serde(default)]
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// Zeroed when absent.
    #[serde(default)]
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub material_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedMaterial {
    #[serde(default = "opaque_white")]
    pub ambient: [f32; 4],
    #[serde(default = "opaque_white")]
    pub diffuse: [f32; 4],
    #[serde(default)]
    pub diffuse_map: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorKey {
    pub time: f32,
    pub value: [f32; 3],
}

/// Rotation key; `value` is `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatKey {
    pub time: f32,
    pub value: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedChannel {
    pub node_name: String,
    #[serde(default)]
    pub position_keys: Vec<VectorKey>,
    #[serde(default)]
    pub rotation_keys: Vec<QuatKey>,
    #[serde(default)]
    pub scale_keys: Vec<VectorKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedAnimation {
    #[serde(default)]
    pub name: String,
    pub ticks_per_second: f32,
    #[serde(default)]
    pub duration_in_ticks: f32,
    #[serde(default)]
    pub channels: Vec<ImportedChannel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedScene {
    pub root: ImportedNode,
    #[serde(default)]
    pub meshes: Vec<ImportedMesh>,
    #[serde(default)]
    pub materials: Vec<ImportedMaterial>,
    #[serde(default)]
    pub animations: Vec<ImportedAnimation>,
}

impl ImportedScene {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Conversion
// ============================================================================

impl ImportedMesh {
    fn to_mesh(&self, index: usize) -> Result<Mesh> {
        let name = if self.name.is_empty() {
            format!("Mesh{index}")
        } else {
            self.name.clone()
        };
        Mesh::from_parts(
            name,
            self.positions.iter().copied().map(Vec3::from_array).collect(),
            self.tex_coords
                .as_ref()
                .map(|uvs| uvs.iter().copied().map(Vec2::from_array).collect()),
            self.indices.clone(),
            self.material_index,
        )
    }
}

impl ImportedMaterial {
    /// The imported diffuse colour is kept even when a map is bound.
    fn to_material(&self) -> Material {
        let diffuse_map = match self.diffuse_map.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => DEFAULT_DIFFUSE_MAP.to_string(),
        };
        Material {
            ambient: Vec4::from_array(self.ambient),
            diffuse: Vec4::from_array(self.diffuse),
            diffuse_map,
        }
    }
}

impl ImportedChannel {
    fn to_channel(&self) -> Result<NodeChannel> {
        Ok(NodeChannel {
            node_name: self.node_name.clone(),
            position: KeyframeTrack::from_keys(
                self.position_keys.iter().map(|k| (k.time, Vec3::from_array(k.value))),
            )?,
            rotation: KeyframeTrack::from_keys(
                self.rotation_keys.iter().map(|k| (k.time, Quat::from_array(k.value))),
            )?,
            scale: KeyframeTrack::from_keys(
                self.scale_keys.iter().map(|k| (k.time, Vec3::from_array(k.value))),
            )?,
        })
    }
}

impl ImportedAnimation {
    pub fn to_clip(&self) -> Result<AnimationClip> {
        let channels = self
            .channels
            .iter()
            .map(ImportedChannel::to_channel)
            .collect::<Result<Vec<_>>>()?;
        AnimationClip::new(
            self.name.clone(),
            self.ticks_per_second,
            self.duration_in_ticks,
            channels,
        )
    }
}

/// Builds the node tree below (and including) the scene root.
///
/// Each node's raw matrix becomes both its rest matrix and its initial TRS.
/// Imported children are linked with an identity rebasing matrix since their
/// matrices are already relative to the parent. Mesh references are not
/// checked here; traversal reports any that are out of range.
fn build_hierarchy(scene: &mut Scene, root: &ImportedNode, max_depth: usize) -> Result<()> {
    // Work stack: (description, parent handle, depth)
    let mut stack: Vec<(&ImportedNode, Option<NodeHandle>, usize)> = vec![(root, None, 1)];

    while let Some((desc, parent, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(TesseraError::HierarchyTooDeep(max_depth));
        }

        let handle = match parent {
            None => scene.root(),
            Some(parent) => {
                let handle = scene.create_node(&desc.name)?;
                scene.link(parent, handle, Mat4::IDENTITY);
                handle
            }
        };

        scene.set_rest_matrix(handle, desc.local_matrix()?)?;
        for &mesh in &desc.meshes {
            scene.push_mesh_ref(handle, mesh);
        }
        log::debug!(
            "Imported node '{}' (depth {depth}, {} meshes, {} children)",
            desc.name,
            desc.meshes.len(),
            desc.children.len()
        );

        for child in desc.children.iter().rev() {
            stack.push((child, Some(handle), depth + 1));
        }
    }

    Ok(())
}

/// Converts an importer description into a scene and its animation
/// context.
pub fn import_scene(imported: &ImportedScene, settings: &EngineSettings) -> Result<(Scene, Animator)> {
    settings.validate()?;

    let mut scene = Scene::with_root(&imported.root.name, settings.scene);
    build_hierarchy(&mut scene, &imported.root, settings.scene.max_depth)?;

    scene.meshes = imported
        .meshes
        .iter()
        .enumerate()
        .map(|(i, mesh)| mesh.to_mesh(i))
        .collect::<Result<Vec<_>>>()?;

    scene.materials = imported
        .materials
        .iter()
        .map(ImportedMaterial::to_material)
        .collect();
    if scene.materials.is_empty() {
        scene.materials.push(Material::default());
    }

    let clips = imported
        .animations
        .iter()
        .map(ImportedAnimation::to_clip)
        .collect::<Result<Vec<_>>>()?;

    let mut animator = Animator::new();
    for ticker in Binder::bind(&scene, &clips, &settings.animation)? {
        animator.register(ticker);
    }

    log::info!(
        "Imported scene '{}': {} nodes, {} meshes, {} materials, {} animated nodes",
        imported.root.name,
        scene.node_count(),
        scene.meshes.len(),
        scene.materials.len(),
        animator.len()
    );

    Ok((scene, animator))
}

/// Parses `json` as an [`ImportedScene`] and imports it.
pub fn import_scene_json(json: &str, settings: &EngineSettings) -> Result<(Scene, Animator)> {
    import_scene(&ImportedScene::from_json_str(json)?, settings)
}
