#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! A minimal 3D scene engine: a transform graph with pivots and frozen
//! rebasing on attach, procedural primitive meshes, and keyframe animation
//! driven by an explicit per-scene [`Animator`].

pub mod animation;
pub mod assets;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;

pub use animation::{AnimationClip, Animator, Binder, InterpolationMode, KeyframeTrack, Ticker, Timeline};
pub use assets::{ImportedScene, import_scene};
pub use errors::{Result, TesseraError};
pub use resources::primitives::*;
pub use resources::{Material, Mesh};
pub use scene::{DrawRequest, Node, NodeHandle, Scene, Transform};
pub use settings::EngineSettings;
