use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;
use crate::errors::{Result, TesseraError};

/// Blend used between two keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Straight componentwise blend, also for quaternions.
    #[default]
    Linear,
    /// Slerp for rotations; identical to `Linear` for other values.
    Spherical,
}

/// Below this, two keys are treated as coincident.
const MIN_KEY_SPACING: f32 = 1e-6;

/// Sparse `(tick, value)` keys for one channel, sorted by tick.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// A track with no keys; it leaves its channel untouched.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Fails if the arrays differ in length, a tick is not finite, or ticks
    /// decrease.
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(TesseraError::InvalidKeyframes(format!(
                "{} times but {} values",
                times.len(),
                values.len()
            )));
        }
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(TesseraError::InvalidKeyframes(format!(
                "non-finite key time {t}"
            )));
        }
        if let Some(w) = times.windows(2).find(|w| w[1] < w[0]) {
            return Err(TesseraError::InvalidKeyframes(format!(
                "key times decrease from {} to {}",
                w[0], w[1]
            )));
        }
        Ok(Self { times, values })
    }

    pub fn from_keys(keys: impl IntoIterator<Item = (f32, T)>) -> Result<Self> {
        let (times, values) = keys.into_iter().unzip();
        Self::new(times, values)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn last_time(&self) -> Option<f32> {
        self.times.last().copied()
    }

    /// Index of the last key strictly before `tick`.
    #[must_use]
    pub fn key_before(&self, tick: f32) -> Option<usize> {
        self.times.iter().rposition(|&t| t < tick)
    }

    /// Value at `tick`, or `None` for an empty track.
    ///
    /// Before the first key the first value holds, after the last key the
    /// last value holds. In between, the two surrounding keys are blended
    /// with `mode`.
    #[must_use]
    pub fn sample(&self, tick: f32, mode: InterpolationMode) -> Option<T> {
        let first = *self.values.first()?;
        let Some(index) = self.key_before(tick) else {
            return Some(first);
        };

        let next = index + 1;
        if next >= self.times.len() {
            return Some(self.values[index]);
        }

        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > MIN_KEY_SPACING {
            ((tick - t0) / dt).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let (v0, v1) = (self.values[index], self.values[next]);
        Some(match mode {
            InterpolationMode::Linear => T::interpolate_linear(v0, v1, t),
            InterpolationMode::Spherical => T::interpolate_spherical(v0, v1, t),
        })
    }
}
