pub mod import;

pub use import::{
    ImportedAnimation, ImportedChannel, ImportedMaterial, ImportedMesh, ImportedNode,
    ImportedScene, MatrixLayout, QuatKey, VectorKey, import_scene, import_scene_json,
};
