use glam::{Quat, Vec3};

use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::Result;
use crate::scene::{NodeHandle, Scene};

/// Values sampled from a timeline at one tick. `None` channels are left
/// unanimated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelSample {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

/// Three keyframe channels driving the transform of one node.
#[derive(Debug, Clone)]
pub struct Timeline {
    node: NodeHandle,
    pub position: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
    pub rotation_mode: InterpolationMode,
}

impl Timeline {
    /// Timeline with three empty channels.
    #[must_use]
    pub fn new(node: NodeHandle) -> Self {
        Self {
            node,
            position: KeyframeTrack::empty(),
            rotation: KeyframeTrack::empty(),
            scale: KeyframeTrack::empty(),
            rotation_mode: InterpolationMode::default(),
        }
    }

    #[must_use]
    pub fn with_tracks(
        node: NodeHandle,
        position: KeyframeTrack<Vec3>,
        rotation: KeyframeTrack<Quat>,
        scale: KeyframeTrack<Vec3>,
    ) -> Self {
        Self {
            node,
            position,
            rotation,
            scale,
            rotation_mode: InterpolationMode::default(),
        }
    }

    #[must_use]
    pub fn with_rotation_mode(mut self, mode: InterpolationMode) -> Self {
        self.rotation_mode = mode;
        self
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// Tick of the latest key on any channel, 0 when all are empty.
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

    #[must_use]
    pub fn sample(&self, tick: f32) -> ChannelSample {
        ChannelSample {
            position: self.position.sample(tick, InterpolationMode::Linear),
            rotation: self.rotation.sample(tick, self.rotation_mode),
            scale: self.scale.sample(tick, InterpolationMode::Linear),
        }
    }

    /// Samples every channel at `tick` and writes the animated ones into the
    /// node's transform.
    pub fn evaluate(&self, tick: f32, scene: &mut Scene) -> Result<()> {
        let sample = self.sample(tick);
        let transform = &mut scene.node_mut(self.node)?.transform;

        if let Some(scale) = sample.scale {
            transform.set_scale(scale);
        }
        if let Some(rotation) = sample.rotation {
            transform.set_rotation(rotation);
        }
        if let Some(position) = sample.position {
            transform.set_position(position);
        }
        transform.mark_dirty();
        Ok(())
    }
}
