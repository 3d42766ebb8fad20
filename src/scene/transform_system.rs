//! Transform System
//!
//! Walks the node tree top-down, refreshing composed matrices and emitting
//! draw requests. Decoupled from [`Scene`](crate::scene::Scene) so it only
//! borrows the node arena and the asset tables it actually needs.
//!
//! Both passes use an explicit work stack instead of recursion and stop with
//! [`TesseraError::HierarchyTooDeep`] once the configured depth is exceeded,
//! so malformed or very deep hierarchies cannot overflow the call stack.

use glam::Mat4;
use slotmap::SlotMap;

use crate::errors::{Result, TesseraError};
use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// One mesh to draw with its composed world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub node: NodeHandle,
    pub mesh_index: usize,
    pub material_index: usize,
    pub transform: Mat4,
}

/// Refreshes every world matrix under `root`.
///
/// A node's world matrix is recomputed when its own local matrix changed or
/// when its parent's world matrix was recomputed. `parent_changed` forces the
/// whole subtree (the caller passes `true` when `parent_world` itself moved).
pub fn update_hierarchy(
    nodes: &mut SlotMap<NodeHandle, Node>,
    root: NodeHandle,
    parent_world: Mat4,
    parent_changed: bool,
    max_depth: usize,
) -> Result<()> {
    // Work stack: (node, parent world matrix, parent changed, depth)
    let mut stack: Vec<(NodeHandle, Mat4, bool, usize)> = Vec::with_capacity(64);
    stack.push((root, parent_world, parent_changed, 1));

    while let Some((handle, parent_world, parent_changed, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(TesseraError::HierarchyTooDeep(max_depth));
        }
        let node = nodes.get_mut(handle).ok_or(TesseraError::InvalidHandle)?;

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;
        if world_needs_update {
            node.world_matrix = parent_world * node.composed_local();
        }

        // Reverse push keeps children in declaration order.
        let world = node.world_matrix;
        for &child in node.children.iter().rev() {
            stack.push((child, world, world_needs_update, depth + 1));
        }
    }

    Ok(())
}

/// Emits one [`DrawRequest`] per mesh reference, pre-order, children in
/// order. Reads the world matrices left by [`update_hierarchy`].
///
/// Mesh and material indices are checked here, at the point of use.
pub fn collect_draws(
    nodes: &SlotMap<NodeHandle, Node>,
    root: NodeHandle,
    meshes: &[Mesh],
    material_count: usize,
    max_depth: usize,
) -> Result<Vec<DrawRequest>> {
    let mut draws = Vec::new();
    let mut stack: Vec<(NodeHandle, usize)> = vec![(root, 1)];

    while let Some((handle, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(TesseraError::HierarchyTooDeep(max_depth));
        }
        let node = nodes.get(handle).ok_or(TesseraError::InvalidHandle)?;

        for &mesh_index in &node.meshes {
            let mesh = meshes
                .get(mesh_index)
                .ok_or(TesseraError::AssetIndexOutOfBounds {
                    context: "mesh".to_string(),
                    index: mesh_index,
                })?;
            if mesh.material_index >= material_count {
                return Err(TesseraError::AssetIndexOutOfBounds {
                    context: "material".to_string(),
                    index: mesh.material_index,
                });
            }
            draws.push(DrawRequest {
                node: handle,
                mesh_index,
                material_index: mesh.material_index,
                transform: node.world_matrix,
            });
        }

        for &child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    Ok(draws)
}
