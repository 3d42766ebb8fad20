use glam::Vec3;

use super::{angle_step, ensure_positive, sweep_segments, vertex_index};
use crate::errors::{Result, TesseraError};
use crate::resources::mesh::Mesh;
use crate::settings::DEFAULT_DETAIL_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderOptions {
    pub percent: f32,
    /// Diameter of the +Y ring. Zero collapses it into an apex.
    pub top_diameter: f32,
    pub bottom_diameter: f32,
    pub height: f32,
    pub detail: u32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            percent: 1.0,
            top_diameter: 1.0,
            bottom_diameter: 1.0,
            height: 1.0,
            detail: DEFAULT_DETAIL_LEVEL,
        }
    }
}

/// Capped (possibly tapered) cylinder along Y.
///
/// Vertex layout: the top ring, the bottom ring, then the top and bottom cap
/// centres. With a zero top diameter the top cap and the upper side
/// triangles would have zero area and are omitted.
pub fn create_cylinder(options: &CylinderOptions) -> Result<Mesh> {
    ensure_positive("bottom diameter", options.bottom_diameter)?;
    ensure_positive("height", options.height)?;
    if !options.top_diameter.is_finite() || options.top_diameter < 0.0 {
        return Err(TesseraError::InvalidGeometry(format!(
            "top diameter must be non-negative, got {}",
            options.top_diameter
        )));
    }
    let segments = sweep_segments(options.detail, options.percent)?;
    let partial = segments < options.detail;
    let has_top = options.top_diameter > 0.0;

    let step = angle_step(options.detail);
    let half_height = options.height / 2.0;
    let stride = segments + 1;

    let mut positions = Vec::with_capacity((2 * stride + 2) as usize);
    for (diameter, y) in [
        (options.top_diameter, half_height),
        (options.bottom_diameter, -half_height),
    ] {
        let r = diameter / 2.0;
        for j in 0..=segments {
            let (sin, cos) = (j as f32 * step).sin_cos();
            positions.push(Vec3::new(r * cos, y, r * sin));
        }
    }
    let top_center = vertex_index(positions.len());
    positions.push(Vec3::new(0.0, half_height, 0.0));
    let bottom_center = top_center + 1;
    positions.push(Vec3::new(0.0, -half_height, 0.0));

    let mut indices = Vec::new();
    for j in 0..segments {
        let a = j;
        let b = stride + j;
        if has_top {
            indices.extend_from_slice(&[a, a + 1, b]);
            indices.extend_from_slice(&[a, top_center, a + 1]);
        }
        indices.extend_from_slice(&[a + 1, b + 1, b]);
        indices.extend_from_slice(&[b, b + 1, bottom_center]);
    }

    if partial {
        let (k1, k2) = (0, stride);
        if has_top {
            indices.extend_from_slice(&[top_center, k1, bottom_center]);
        }
        indices.extend_from_slice(&[bottom_center, k1, k2]);
        if has_top {
            indices.extend_from_slice(&[top_center, bottom_center, k1 + segments]);
        }
        indices.extend_from_slice(&[bottom_center, k2 + segments, k1 + segments]);
    }

    let name = if has_top { "Cylinder" } else { "Cone" };
    Mesh::generated(name, positions, indices)
}

/// Cylinder whose top ring collapses to an apex.
pub fn create_cone(options: &CylinderOptions) -> Result<Mesh> {
    create_cylinder(&CylinderOptions {
        top_diameter: 0.0,
        ..*options
    })
}
