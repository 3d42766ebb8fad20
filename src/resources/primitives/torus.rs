use glam::Vec3;

use super::{angle_step, ensure_positive, sweep_segments};
use crate::errors::{Result, TesseraError};
use crate::resources::mesh::Mesh;
use crate::settings::{DEFAULT_DETAIL_LEVEL, MAX_DETAIL_LEVEL, MIN_DETAIL_LEVEL};

/// Distance from the torus centre to the middle of the tube.
const RING_RADIUS: f32 = 0.5;

/// Tube diameter at `tube_diameter == 1`.
const TUBE_SCALE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusOptions {
    pub percent: f32,
    /// Relative tube thickness; `1.0` gives a tube radius of 0.125.
    pub tube_diameter: f32,
    /// Samples around the tube cross-section. `None` uses `detail`.
    ///
    /// Only the tube resolution changes; the sweep around the centre always
    /// follows `detail` and `percent`.
    pub rings: Option<u32>,
    pub detail: u32,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            percent: 1.0,
            tube_diameter: 1.0,
            rings: None,
            detail: DEFAULT_DETAIL_LEVEL,
        }
    }
}

/// Torus lying in the XZ plane. A partial sweep leaves the tube ends open.
pub fn create_torus(options: &TorusOptions) -> Result<Mesh> {
    ensure_positive("tube diameter", options.tube_diameter)?;
    let segments = sweep_segments(options.detail, options.percent)?;
    let rings = options.rings.unwrap_or(options.detail);
    if !(MIN_DETAIL_LEVEL..=MAX_DETAIL_LEVEL).contains(&rings) {
        return Err(TesseraError::InvalidGeometry(format!(
            "torus tube rings must be in {MIN_DETAIL_LEVEL}..={MAX_DETAIL_LEVEL}, got {rings}"
        )));
    }

    let tube_radius = TUBE_SCALE * options.tube_diameter / 2.0;
    let h_step = angle_step(options.detail);
    let v_step = angle_step(rings);
    let stride = segments + 1;

    let mut positions = Vec::with_capacity(((rings + 1) * stride) as usize);
    for i in 0..=rings {
        let (sin_v, cos_v) = (i as f32 * v_step).sin_cos();
        let reach = RING_RADIUS + tube_radius * cos_v;
        for j in 0..=segments {
            let (sin_h, cos_h) = (j as f32 * h_step).sin_cos();
            positions.push(Vec3::new(reach * cos_h, -tube_radius * sin_v, reach * sin_h));
        }
    }

    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for i in 0..rings {
        let k1 = i * stride;
        let k2 = k1 + stride;
        for j in 0..segments {
            let a = k1 + j;
            let b = k2 + j;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    Mesh::generated("Torus", positions, indices)
}
