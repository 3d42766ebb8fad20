use glam::Vec3;

use super::plane::SHEET_HALF_THICKNESS;
use super::{angle_step, sweep_segments, vertex_index};
use crate::errors::Result;
use crate::resources::mesh::Mesh;
use crate::settings::DEFAULT_DETAIL_LEVEL;

const DISC_RADIUS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscOptions {
    pub percent: f32,
    pub detail: u32,
}

impl Default for DiscOptions {
    fn default() -> Self {
        Self {
            percent: 1.0,
            detail: DEFAULT_DETAIL_LEVEL,
        }
    }
}

/// Thin two-sided disc (or pie slice) in the XZ plane.
///
/// Vertex layout per face: the rim samples followed by the face centre. The
/// +Y face comes first.
pub fn create_disc(options: &DiscOptions) -> Result<Mesh> {
    let segments = sweep_segments(options.detail, options.percent)?;
    let step = angle_step(options.detail);

    let mut positions = Vec::with_capacity(2 * (segments as usize + 2));
    let mut indices = Vec::with_capacity(6 * segments as usize);

    for y in [SHEET_HALF_THICKNESS, -SHEET_HALF_THICKNESS] {
        let first = vertex_index(positions.len());
        for j in 0..=segments {
            let (sin, cos) = (j as f32 * step).sin_cos();
            positions.push(Vec3::new(DISC_RADIUS * cos, y, DISC_RADIUS * sin));
        }
        let center = vertex_index(positions.len());
        positions.push(Vec3::new(0.0, y, 0.0));

        let facing_up = y > 0.0;
        for j in 0..segments {
            let a = first + j;
            if facing_up {
                indices.extend_from_slice(&[a, center, a + 1]);
            } else {
                indices.extend_from_slice(&[a, a + 1, center]);
            }
        }
    }

    Mesh::generated("Disc", positions, indices)
}
