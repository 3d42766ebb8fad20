use crate::animation::clip::AnimationClip;
use crate::animation::ticker::Ticker;
use crate::animation::timeline::Timeline;
use crate::errors::Result;
use crate::scene::Scene;
use crate::settings::AnimationSettings;

pub struct Binder;

impl Binder {
    /// Longest clip, in seconds.
    #[must_use]
    pub fn shared_period_seconds(clips: &[AnimationClip]) -> f32 {
        clips
            .iter()
            .map(AnimationClip::duration_seconds)
            .fold(0.0, f32::max)
    }

    /// Resolves every channel of `clips` to a scene node and builds one
    /// ticker per channel.
    ///
    /// All tickers loop with the same wall-clock period (that of the longest
    /// clip), converted to each clip's own tick rate. Channels whose keys end
    /// earlier hold their last key until the loop wraps. A channel naming a
    /// node that is not in the scene fails the whole bind.
    pub fn bind(
        scene: &Scene,
        clips: &[AnimationClip],
        settings: &AnimationSettings,
    ) -> Result<Vec<Ticker>> {
        let period = Self::shared_period_seconds(clips);
        let mut tickers = Vec::with_capacity(clips.iter().map(|c| c.channels.len()).sum());

        for clip in clips {
            let loop_ticks = period * clip.ticks_per_second;
            for channel in &clip.channels {
                let node = scene.node_by_name(&channel.node_name)?;

                let last_key = channel.last_key_tick();
                if last_key < loop_ticks {
                    log::warn!(
                        "Channel '{}' of '{}' ends at tick {last_key}, before the shared loop at {loop_ticks}; holding its last key",
                        channel.node_name,
                        clip.name
                    );
                }

                let timeline = Timeline::with_tracks(
                    node,
                    channel.position.clone(),
                    channel.rotation.clone(),
                    channel.scale.clone(),
                )
                .with_rotation_mode(settings.rotation_interpolation);

                tickers.push(Ticker::new(timeline, clip.ticks_per_second, loop_ticks)?);
            }
        }

        Ok(tickers)
    }
}
