use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::errors::{Result, TesseraError};
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform_system::{self, DrawRequest};
use crate::settings::SceneSettings;

/// Name given to the root of a procedurally built scene.
pub const ROOT_NODE_NAME: &str = "ROOT";

/// Determinants below this are treated as singular when snapshotting a
/// parent inverse.
const SINGULAR_EPSILON: f32 = 1e-12;

/// Scene graph container.
///
/// Owns the node arena, the name lookup table and the mesh and material
/// tables that nodes reference by index. There is always exactly one root;
/// nodes created with [`Scene::create_node`] stay detached (and are not
/// drawn) until they are attached somewhere below it.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    names: FxHashMap<String, NodeHandle>,
    root: NodeHandle,

    // ==== Asset tables ====
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,

    settings: SceneSettings,
    /// Parent matrix used by the last traversal.
    last_parent_world: Option<Mat4>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty procedural scene: a `ROOT` node and one default material.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(SceneSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: SceneSettings) -> Self {
        let mut scene = Self::with_root(ROOT_NODE_NAME, settings);
        scene.materials.push(Material::default());
        scene
    }

    /// Scene whose root is called `name`, with empty asset tables.
    pub(crate) fn with_root(name: &str, settings: SceneSettings) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(name));
        let mut names = FxHashMap::default();
        names.insert(name.to_string(), root);

        Self {
            nodes,
            names,
            root,
            meshes: Vec::new(),
            materials: Vec::new(),
            settings,
            last_parent_world: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    // ========================================================================
    // Node API
    // ========================================================================

    /// Creates a detached node with an identity transform.
    pub fn create_node(&mut self, name: &str) -> Result<NodeHandle> {
        if self.names.contains_key(name) {
            return Err(TesseraError::DuplicateNodeName(name.to_string()));
        }
        let handle = self.nodes.insert(Node::new(name));
        self.names.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Creates a node and attaches it under `parent`.
    pub fn add_child(&mut self, parent: NodeHandle, name: &str) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(TesseraError::InvalidHandle);
        }
        let child = self.create_node(name)?;
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Makes `child` a child of `parent`.
    ///
    /// The inverse of the parent's current local matrix is stored on the
    /// child as a rebasing factor. It is frozen: moving the parent later does
    /// not refresh it. Fails if the child already has a parent, if the link
    /// would create a cycle, or if the parent matrix cannot be inverted.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        let parent_node = self.nodes.get(parent).ok_or(TesseraError::InvalidHandle)?;
        let child_node = self.nodes.get(child).ok_or(TesseraError::InvalidHandle)?;

        if let Some(current) = child_node.parent {
            return Err(TesseraError::AlreadyParented {
                child: child_node.name.clone(),
                parent: self.nodes[current].name.clone(),
            });
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TesseraError::HierarchyCycle {
                child: child_node.name.clone(),
                parent: parent_node.name.clone(),
            });
        }

        let parent_local = parent_node.transform.compose();
        let det = parent_local.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(TesseraError::SingularMatrix(parent_node.name.clone()));
        }

        self.link(parent, child, parent_local.inverse());
        Ok(())
    }

    /// Unchecked link used by attach and by the importer.
    pub(crate) fn link(&mut self, parent: NodeHandle, child: NodeHandle, parent_inverse: Mat4) {
        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.parent_inverse = parent_inverse;
        node.transform.mark_dirty();
    }

    /// Whether `ancestor` is on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    /// Sets the pivot that the node's rotation and scale act around.
    pub fn set_origin(&mut self, node: NodeHandle, offset: Vec3) -> Result<()> {
        self.node_mut(node)?.set_origin(offset);
        Ok(())
    }

    /// Restores the node's TRS from its authored rest matrix.
    pub fn reset_to_rest(&mut self, node: NodeHandle) -> Result<()> {
        let node = self.node_mut(node)?;
        let rest = node.rest_matrix;
        node.transform.apply_local_matrix(rest);
        Ok(())
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    pub fn node_by_name(&self, name: &str) -> Result<NodeHandle> {
        self.find(name)
            .ok_or_else(|| TesseraError::NodeNotFound(name.to_string()))
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// Mutable access for editing TRS.
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    pub fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes.get(handle).ok_or(TesseraError::InvalidHandle)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        self.nodes.get_mut(handle).ok_or(TesseraError::InvalidHandle)
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }

    pub(crate) fn set_rest_matrix(&mut self, node: NodeHandle, matrix: Mat4) -> Result<()> {
        let node = self.node_mut(node)?;
        node.rest_matrix = matrix;
        node.transform.apply_local_matrix(matrix);
        Ok(())
    }

    // ========================================================================
    // Mesh & material API
    // ========================================================================

    /// Appends `mesh` to the mesh table with the given material slot and
    /// draws it from `node`. Returns the mesh index.
    pub fn add_mesh(&mut self, node: NodeHandle, mut mesh: Mesh, material: usize) -> Result<usize> {
        if !self.nodes.contains_key(node) {
            return Err(TesseraError::InvalidHandle);
        }
        if material >= self.materials.len() {
            return Err(TesseraError::AssetIndexOutOfBounds {
                context: "material".to_string(),
                index: material,
            });
        }
        mesh.material_index = material;
        let index = self.meshes.len();
        self.meshes.push(mesh);
        self.nodes[node].meshes.push(index);
        Ok(index)
    }

    /// Draws an existing mesh-table entry from `node` as well.
    pub fn reference_mesh(&mut self, node: NodeHandle, mesh_index: usize) -> Result<()> {
        if mesh_index >= self.meshes.len() {
            return Err(TesseraError::AssetIndexOutOfBounds {
                context: "mesh".to_string(),
                index: mesh_index,
            });
        }
        self.node_mut(node)?.meshes.push(mesh_index);
        Ok(())
    }

    /// Unchecked mesh reference; the importer defers validation to traversal.
    pub(crate) fn push_mesh_ref(&mut self, node: NodeHandle, mesh_index: usize) {
        self.nodes[node].meshes.push(mesh_index);
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Adds an untextured material from 8-bit channels.
    pub fn add_color_material(&mut self, r: u8, g: u8, b: u8, a: u8) -> usize {
        self.add_material(Material::from_rgba8(r, g, b, a))
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Refreshes every world matrix reachable from the root.
    pub fn update_world_matrices(&mut self) -> Result<()> {
        self.update_world_matrices_with(Mat4::IDENTITY)
    }

    pub fn update_world_matrices_with(&mut self, parent: Mat4) -> Result<()> {
        let parent_changed = self.last_parent_world != Some(parent);
        transform_system::update_hierarchy(
            &mut self.nodes,
            self.root,
            parent,
            parent_changed,
            self.settings.max_depth,
        )?;
        self.last_parent_world = Some(parent);
        Ok(())
    }

    /// Refreshes world matrices and returns one draw request per mesh
    /// reference, in depth-first order.
    pub fn traverse(&mut self) -> Result<Vec<DrawRequest>> {
        self.traverse_with(Mat4::IDENTITY)
    }

    /// As [`Scene::traverse`], with the whole tree placed under `parent`.
    pub fn traverse_with(&mut self, parent: Mat4) -> Result<Vec<DrawRequest>> {
        self.update_world_matrices_with(parent)?;
        transform_system::collect_draws(
            &self.nodes,
            self.root,
            &self.meshes,
            self.materials.len(),
            self.settings.max_depth,
        )
    }
}
