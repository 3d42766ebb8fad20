use crate::animation::timeline::Timeline;
use crate::errors::{Result, TesseraError};
use crate::scene::Scene;

fn ensure_positive(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TesseraError::InvalidTiming(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

/// Advances one timeline's tick and wraps it into `[0, duration)`.
#[derive(Debug, Clone)]
pub struct Ticker {
    /// Ticks per unit of elapsed time.
    rate: f32,
    /// Loop period in ticks.
    duration: f32,
    current: f32,
    timeline: Timeline,
}

impl Ticker {
    pub fn new(timeline: Timeline, rate: f32, duration: f32) -> Result<Self> {
        ensure_positive("tick rate", rate)?;
        ensure_positive("loop duration", duration)?;
        Ok(Self {
            rate,
            duration,
            current: 0.0,
            timeline,
        })
    }

    #[inline]
    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn current_tick(&self) -> f32 {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Jumps to `tick`, wrapped into the loop.
    pub fn seek(&mut self, tick: f32) -> Result<()> {
        if !tick.is_finite() {
            return Err(TesseraError::InvalidTiming(format!("cannot seek to {tick}")));
        }
        self.current = self.wrap(tick);
        Ok(())
    }

    /// Adds `rate × elapsed` to the current tick and wraps. Negative elapsed
    /// time plays backwards.
    pub fn advance(&mut self, elapsed: f32) -> Result<f32> {
        if !elapsed.is_finite() {
            return Err(TesseraError::InvalidTiming(format!(
                "elapsed time must be finite, got {elapsed}"
            )));
        }
        self.current = self.wrap(self.current + self.rate * elapsed);
        Ok(self.current)
    }

    /// Advances, then writes the timeline's values at the new tick into the
    /// scene.
    pub fn update(&mut self, elapsed: f32, scene: &mut Scene) -> Result<()> {
        let tick = self.advance(elapsed)?;
        self.timeline.evaluate(tick, scene)
    }

    fn wrap(&self, tick: f32) -> f32 {
        let wrapped = tick.rem_euclid(self.duration);
        // rem_euclid can round up to the divisor for tiny negative inputs.
        if wrapped >= self.duration { 0.0 } else { wrapped }
    }
}
