use glam::{Quat, Vec2, Vec3};

use super::{angle_step, ensure_positive, sweep_segments, vertex_index};
use crate::errors::{Result, TesseraError};
use crate::resources::mesh::Mesh;
use crate::settings::{DEFAULT_DETAIL_LEVEL, LATHE_DETAIL_MULTIPLIER, MAX_DETAIL_LEVEL};

#[derive(Debug, Clone, PartialEq)]
pub struct CurvedCylinderOptions {
    /// Bezier control points of the centreline, in the YZ plane
    /// (`x` maps to Y, `y` maps to Z).
    pub control_points: Vec<Vec2>,
    pub percent: f32,
    pub diameter: f32,
    /// Segments per full turn of each cross-section ring. This stays at the
    /// base detail level on purpose; only the centreline is sampled finer.
    pub detail: u32,
    /// Number of intervals the centreline is sampled at, normally
    /// `detail × LATHE_DETAIL_MULTIPLIER`.
    pub profile_samples: u32,
}

impl Default for CurvedCylinderOptions {
    fn default() -> Self {
        Self {
            control_points: vec![Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)],
            percent: 1.0,
            diameter: 0.2,
            detail: DEFAULT_DETAIL_LEVEL,
            profile_samples: DEFAULT_DETAIL_LEVEL * LATHE_DETAIL_MULTIPLIER,
        }
    }
}

/// Samples the Bezier curve defined by `points` at `samples + 1` evenly
/// spaced parameters, endpoints included.
pub fn bezier_curve(points: &[Vec2], samples: u32) -> Result<Vec<Vec2>> {
    if points.len() < 2 {
        return Err(TesseraError::InvalidGeometry(format!(
            "bezier curve needs at least 2 control points, got {}",
            points.len()
        )));
    }
    if samples == 0 {
        return Err(TesseraError::InvalidGeometry(
            "bezier curve needs at least one sample interval".to_string(),
        ));
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(TesseraError::InvalidGeometry(format!(
            "non-finite control point {p}"
        )));
    }

    let degree = points.len() - 1;
    let coefficients = binomial_row(degree);

    let curve = (0..=samples)
        .map(|s| {
            let t = s as f32 / samples as f32;
            points
                .iter()
                .zip(&coefficients)
                .enumerate()
                .fold(Vec2::ZERO, |acc, (i, (p, c))| {
                    let basis = c * t.powi(i as i32) * (1.0 - t).powi((degree - i) as i32);
                    acc + *p * basis
                })
        })
        .collect();
    Ok(curve)
}

/// `C(n, 0) ..= C(n, n)`.
fn binomial_row(n: usize) -> Vec<f32> {
    let mut row = Vec::with_capacity(n + 1);
    let mut c = 1.0_f64;
    for k in 0..=n {
        row.push(c as f32);
        c = c * (n - k) as f64 / (k + 1) as f64;
    }
    row
}

/// Tube swept along a Bezier centreline in the YZ plane.
///
/// Vertex layout: one ring per centreline sample, then the start and end cap
/// centres, then (partial sweeps only) the centreline samples that anchor the
/// cut faces. Each ring lies in the plane perpendicular to the local
/// direction of travel.
///
/// The ring resolution is deliberately the base detail level while the
/// centreline uses `profile_samples`, so a bend stays smooth without
/// multiplying the vertex count around the tube.
pub fn create_curved_cylinder(options: &CurvedCylinderOptions) -> Result<Mesh> {
    ensure_positive("diameter", options.diameter)?;
    let segments = sweep_segments(options.detail, options.percent)?;
    let max_samples = MAX_DETAIL_LEVEL * LATHE_DETAIL_MULTIPLIER;
    if options.profile_samples > max_samples {
        return Err(TesseraError::InvalidGeometry(format!(
            "profile samples must be at most {max_samples}, got {}",
            options.profile_samples
        )));
    }
    let partial = segments < options.detail;
    let profile = bezier_curve(&options.control_points, options.profile_samples)?;

    let radius = options.diameter / 2.0;
    let step = angle_step(options.detail);
    let stride = segments + 1;
    let rows = profile.len();
    let to_space = |p: Vec2| Vec3::new(0.0, p.x, p.y);

    let mut positions = Vec::with_capacity(rows * stride as usize + 2 + rows);
    let mut heading = 0.0_f32;
    for (i, &center) in profile.iter().enumerate() {
        // The final row keeps the heading of the segment leading into it.
        if let Some(&next) = profile.get(i + 1) {
            let travel = next - center;
            heading = travel.x.atan2(travel.y);
        }
        let tilt = Quat::from_rotation_x(-heading);
        for j in 0..=segments {
            let (sin, cos) = (j as f32 * step).sin_cos();
            let local = Vec3::new(radius * cos, radius * sin, 0.0);
            positions.push(tilt * local + to_space(center));
        }
    }

    let start_cap = vertex_index(positions.len());
    let end_cap = start_cap + 1;
    let first = profile[0];
    let last = profile[rows - 1];
    positions.push(to_space(first));
    positions.push(to_space(last));

    let mut indices = Vec::new();
    for i in 0..rows as u32 {
        let k1 = i * stride;
        let k2 = k1 + stride;
        let last_row = i as usize == rows - 1;
        for j in 0..segments {
            let a = k1 + j;
            let b = k2 + j;
            if !last_row {
                indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
            if i == 0 {
                indices.extend_from_slice(&[a, start_cap, a + 1]);
            } else if last_row {
                indices.extend_from_slice(&[a, a + 1, end_cap]);
            }
        }
    }

    if partial {
        let spine = vertex_index(positions.len());
        positions.extend(profile.iter().map(|&p| to_space(p)));
        for i in 0..(rows - 1) as u32 {
            let c0 = spine + i;
            let c1 = c0 + 1;
            let e0 = i * stride;
            let e1 = e0 + stride;
            indices.extend_from_slice(&[c0, e0, c1]);
            indices.extend_from_slice(&[c1, e0, e1]);
            indices.extend_from_slice(&[c0, c1, e0 + segments]);
            indices.extend_from_slice(&[c1, e1 + segments, e0 + segments]);
        }
    }

    Mesh::generated("CurvedCylinder", positions, indices)
}
