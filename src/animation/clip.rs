use glam::{Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;
use crate::errors::{Result, TesseraError};

/// Keyframes for one named node.
#[derive(Debug, Clone, Default)]
pub struct NodeChannel {
    pub node_name: String,
    pub position: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
}

impl NodeChannel {
    #[must_use]
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn last_key_tick(&self) -> f32 {
        [
            self.position.last_time(),
            self.rotation.last_time(),
            self.scale.last_time(),
        ]
        .into_iter()
        .flatten()
        .fold(0.0, f32::max)
    }
}

/// An authored animation: node channels sharing one tick rate.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub ticks_per_second: f32,
    /// Authored length. Zero means "up to the last key".
    pub duration_in_ticks: f32,
    pub channels: Vec<NodeChannel>,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        ticks_per_second: f32,
        duration_in_ticks: f32,
        channels: Vec<NodeChannel>,
    ) -> Result<Self> {
        let name = name.into();
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(TesseraError::InvalidTiming(format!(
                "animation '{name}' has tick rate {ticks_per_second}"
            )));
        }
        if !duration_in_ticks.is_finite() || duration_in_ticks < 0.0 {
            return Err(TesseraError::InvalidTiming(format!(
                "animation '{name}' has duration {duration_in_ticks}"
            )));
        }
        Ok(Self {
            name,
            ticks_per_second,
            duration_in_ticks,
            channels,
        })
    }

    #[must_use]
    pub fn last_key_tick(&self) -> f32 {
        self.channels
            .iter()
            .map(NodeChannel::last_key_tick)
            .fold(0.0, f32::max)
    }

    /// Authored duration, or the last key when none was authored.
    #[must_use]
    pub fn duration_ticks(&self) -> f32 {
        if self.duration_in_ticks > 0.0 {
            self.duration_in_ticks
        } else {
            self.last_key_tick()
        }
    }

    #[must_use]
    pub fn duration_seconds(&self) -> f32 {
        self.duration_ticks() / self.ticks_per_second
    }
}
