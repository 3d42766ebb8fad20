//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`TesseraError`] groups failures into three families:
//! - Malformed hierarchies (re-parenting, name collisions, cycles, depth)
//! - Degenerate parameters (detail levels, timings, singular matrices)
//! - Missing references (stale handles, unknown names, out-of-range indices)
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, TesseraError>`.
//!
//! ```rust,ignore
//! use tessera::errors::Result;
//!
//! fn build() -> Result<()> {
//!     let mut scene = tessera::Scene::new();
//!     let arm = scene.create_node("Arm")?;
//!     let root = scene.root();
//!     scene.attach(root, arm)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the engine.
#[derive(Error, Debug)]
pub enum TesseraError {
    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// The child already belongs to another parent.
    #[error("Node '{child}' is already attached to '{parent}'")]
    AlreadyParented {
        /// Name of the node being attached
        child: String,
        /// Name of its current parent
        parent: String,
    },

    /// A node with the same name is already registered in the scene.
    #[error("Duplicate node name: {0}")]
    DuplicateNodeName(String),

    /// Attaching would make a node its own ancestor.
    #[error("Cannot attach '{child}' under '{parent}': would create a cycle")]
    HierarchyCycle {
        /// Name of the node being attached
        child: String,
        /// Name of the requested parent
        parent: String,
    },

    /// The hierarchy is deeper than the configured limit.
    #[error("Hierarchy exceeds the maximum depth of {0}")]
    HierarchyTooDeep(usize),

    // ========================================================================
    // Parameter Errors
    // ========================================================================
    /// A shape generator received unusable parameters.
    #[error("Invalid geometry parameter: {0}")]
    InvalidGeometry(String),

    /// A ticker received a non-positive or non-finite rate/duration/delta.
    #[error("Invalid animation timing: {0}")]
    InvalidTiming(String),

    /// Keyframe data is inconsistent (length mismatch, unsorted, non-finite).
    #[error("Invalid keyframes: {0}")]
    InvalidKeyframes(String),

    /// A matrix that must be inverted has no inverse.
    #[error("Matrix of node '{0}' is not invertible")]
    SingularMatrix(String),

    /// Mesh buffers violate the triangle soup invariants.
    #[error("Invalid mesh '{name}': {reason}")]
    InvalidMesh {
        /// Mesh name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// An imported transform cannot be used (non-finite entries).
    #[error("Invalid transform on node '{node}': {reason}")]
    InvalidTransform {
        /// Node name
        node: String,
        /// What is wrong with it
        reason: String,
    },

    /// Engine settings are out of range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // Reference Errors
    // ========================================================================
    /// A node name lookup failed.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A node handle no longer refers to a live node.
    #[error("Invalid node handle")]
    InvalidHandle,

    /// Asset index out of bounds.
    #[error("Asset index out of bounds: {context} (index: {index})")]
    AssetIndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, TesseraError>`.
pub type Result<T> = std::result::Result<T, TesseraError>;
