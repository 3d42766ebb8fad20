//! Scene graph module
//!
//! Manages the node hierarchy and its transforms:
//! - Node: tree node with transform, pivot, rebasing matrix and mesh refs
//! - Transform: canonical TRS with a cached local matrix
//! - Scene: node arena plus the mesh and material tables
//! - TransformSystem: iterative traversal producing draw requests

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::{ROOT_NODE_NAME, Scene};
pub use transform::Transform;
pub use transform_system::DrawRequest;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
