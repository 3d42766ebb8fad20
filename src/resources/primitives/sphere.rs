use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use super::{angle_step, ensure_positive, sweep_segments, vertex_index};
use crate::errors::Result;
use crate::resources::mesh::Mesh;
use crate::settings::DEFAULT_DETAIL_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereOptions {
    pub radius: f32,
    /// Fraction of the full longitude sweep, in `(0, 1]`.
    pub percent: f32,
    /// Segments per full turn. Also used as the number of latitude bands.
    pub detail: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 0.5,
            percent: 1.0,
            detail: DEFAULT_DETAIL_LEVEL,
        }
    }
}

/// UV sphere, optionally cut along a meridian.
///
/// Vertex layout: `detail + 1` latitude rows from the -Y pole to the +Y pole,
/// each with `segments + 1` samples, followed by one hub vertex at the centre.
/// The hub closes the two cut faces of a partial sweep and is left
/// unreferenced by a full sphere.
pub fn create_sphere(options: &SphereOptions) -> Result<Mesh> {
    ensure_positive("radius", options.radius)?;
    let segments = sweep_segments(options.detail, options.percent)?;
    let partial = segments < options.detail;

    let radius = options.radius;
    let rings = options.detail;
    let h_step = angle_step(options.detail);
    let v_step = PI / rings as f32;
    let stride = segments + 1;

    let mut positions = Vec::with_capacity(((rings + 1) * stride + 1) as usize);
    for i in 0..=rings {
        let (sin_v, cos_v) = (FRAC_PI_2 - i as f32 * v_step).sin_cos();
        for j in 0..=segments {
            let (sin_h, cos_h) = (j as f32 * h_step).sin_cos();
            positions.push(Vec3::new(
                radius * cos_v * cos_h,
                -radius * sin_v,
                radius * cos_v * sin_h,
            ));
        }
    }
    let hub = vertex_index(positions.len());
    positions.push(Vec3::ZERO);

    let mut indices = Vec::new();
    for i in 0..rings {
        let k1 = i * stride;
        let k2 = k1 + stride;
        for j in 0..segments {
            let a = k1 + j;
            let b = k2 + j;
            // Pole rows collapse to a point, so each skips its zero-area half.
            if i != 0 {
                indices.extend_from_slice(&[a, b, a + 1]);
            }
            if i != rings - 1 {
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
        if partial {
            indices.extend_from_slice(&[k1, hub, k2]);
            indices.extend_from_slice(&[k1 + segments, k2 + segments, hub]);
        }
    }

    Mesh::generated("Sphere", positions, indices)
}
