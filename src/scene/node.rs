use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A scene node: hierarchy links, a transform and the meshes it draws.
///
/// # Hierarchy
///
/// - `parent`: back reference (None for the root and for detached nodes)
/// - `children`: owned children, drawn in order
///
/// Links are only edited through [`Scene`](crate::scene::Scene), which
/// keeps both sides in sync and rejects cycles.
///
/// # Composition
///
/// ```text
/// world = parent_world · origin · parent_inverse · local · origin⁻¹
/// ```
///
/// `parent_inverse` is a rebasing factor frozen when the node is attached.
/// It is not recomputed when the parent later moves. `origin` is the pivot
/// that rotation and scale act around.
#[derive(Debug, Clone)]
pub struct Node {
    // === Identity ===
    pub(crate) name: String,

    // === Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Spatial data ===
    pub transform: Transform,
    pub(crate) origin: Mat4,
    pub(crate) origin_inverse: Mat4,
    pub(crate) parent_inverse: Mat4,
    /// Local matrix as authored by the importer.
    pub(crate) rest_matrix: Mat4,
    pub(crate) world_matrix: Mat4,

    // === Drawables ===
    /// Indices into the owning scene's mesh table.
    pub(crate) meshes: SmallVec<[usize; 2]>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            origin: Mat4::IDENTITY,
            origin_inverse: Mat4::IDENTITY,
            parent_inverse: Mat4::IDENTITY,
            rest_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            meshes: SmallVec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[usize] {
        &self.meshes
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> &Mat4 {
        &self.origin
    }

    #[inline]
    #[must_use]
    pub fn parent_inverse(&self) -> &Mat4 {
        &self.parent_inverse
    }

    #[inline]
    #[must_use]
    pub fn rest_matrix(&self) -> &Mat4 {
        &self.rest_matrix
    }

    /// Composed transform as of the last hierarchy update.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Moves the pivot to `offset` in the node's parent space.
    pub(crate) fn set_origin(&mut self, offset: Vec3) {
        self.origin = Mat4::from_translation(offset);
        self.origin_inverse = Mat4::from_translation(-offset);
        self.transform.mark_dirty();
    }

    /// Everything between the parent's world matrix and this node's world
    /// matrix, using the cached local matrix.
    #[must_use]
    pub fn composed_local(&self) -> Mat4 {
        self.origin * self.parent_inverse * *self.transform.local_matrix() * self.origin_inverse
    }
}
