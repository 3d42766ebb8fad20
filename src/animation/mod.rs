//! Keyframe animation
//!
//! - KeyframeTrack: sparse `(tick, value)` keys for one channel
//! - Timeline: position/rotation/scale tracks bound to one node
//! - Ticker: advances a timeline's tick and wraps it at the loop period
//! - Animator: the per-scene set of tickers, advanced once per frame
//! - AnimationClip / Binder: authored animations and their binding to nodes

pub mod animator;
pub mod binder;
pub mod clip;
pub mod ticker;
pub mod timeline;
pub mod tracks;
pub mod values;

pub use animator::{Animator, TickerKey};
pub use binder::Binder;
pub use clip::{AnimationClip, NodeChannel};
pub use ticker::Ticker;
pub use timeline::{ChannelSample, Timeline};
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::Interpolatable;
