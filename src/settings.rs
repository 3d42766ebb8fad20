//! Engine Settings
//!
//! Tunables shared by the geometry generators, the scene traversal and the
//! animation subsystem. Settings are plain data and can be loaded from JSON:
//!
//! ```rust,ignore
//! use tessera::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_json_str(r#"{ "geometry": { "detail_level": 48 } }"#)?;
//! assert_eq!(settings.geometry.lathe_detail(), 480);
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::tracks::InterpolationMode;
use crate::errors::{Result, TesseraError};

/// Default angular resolution for every round primitive.
pub const DEFAULT_DETAIL_LEVEL: u32 = 32;

/// Profile sampling of the curved cylinder is this many times finer than the
/// base detail level.
pub const LATHE_DETAIL_MULTIPLIER: u32 = 10;

/// Default bound on hierarchy depth for import and traversal.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Smallest detail level that still produces a closed ring.
pub const MIN_DETAIL_LEVEL: u32 = 3;

/// Largest accepted detail level. Vertex indices are `u32`, and the densest
/// generator (the curved cylinder at 10× profile sampling) must stay inside
/// that range.
pub const MAX_DETAIL_LEVEL: u32 = 4096;

// ---------------------------------------------------------------------------
// GeometrySettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Number of angular segments in a full 360° sweep.
    pub detail_level: u32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            detail_level: DEFAULT_DETAIL_LEVEL,
        }
    }
}

impl GeometrySettings {
    /// Profile sample count used by the curved cylinder.
    #[inline]
    #[must_use]
    pub fn lathe_detail(&self) -> u32 {
        self.detail_level.saturating_mul(LATHE_DETAIL_MULTIPLIER)
    }

    pub fn validate(&self) -> Result<()> {
        if self.detail_level < MIN_DETAIL_LEVEL {
            return Err(TesseraError::InvalidSettings(format!(
                "geometry.detail_level must be at least {MIN_DETAIL_LEVEL}, got {}",
                self.detail_level
            )));
        }
        if self.detail_level > MAX_DETAIL_LEVEL {
            return Err(TesseraError::InvalidSettings(format!(
                "geometry.detail_level must be at most {MAX_DETAIL_LEVEL}, got {}",
                self.detail_level
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SceneSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Maximum nesting depth accepted by import and traversal.
    pub max_depth: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SceneSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(TesseraError::InvalidSettings(
                "scene.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AnimationSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Blend used for rotation channels. `Linear` reproduces authored content
    /// exactly; `Spherical` is the corrected mode.
    pub rotation_interpolation: InterpolationMode,
}

// ---------------------------------------------------------------------------
// EngineSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub geometry: GeometrySettings,
    pub scene: SceneSettings,
    pub animation: AnimationSettings,
}

impl EngineSettings {
    /// Parses settings from JSON. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.scene.validate()
    }
}
