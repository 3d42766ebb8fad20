//! Core resource definitions
//!
//! CPU-side data owned by a scene and referenced from nodes by index:
//! - Mesh: triangle soup with upload views
//! - Material: colour / diffuse-map description
//! - primitives: procedural shape generators

pub mod mesh;
pub mod material;
pub mod primitives;

pub use mesh::Mesh;
pub use material::{DEFAULT_DIFFUSE_MAP, Material};
