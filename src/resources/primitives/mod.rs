//! Procedural shape generators.
//!
//! Every generator is a pure function from shape parameters to a [`Mesh`]
//! whose texture coordinates are zeroed. Round shapes share one
//! parametrization: `detail` angular segments for a full turn, truncated to
//! `floor(detail × percent)` segments when `percent < 1`. Where a truncated
//! sweep leaves an opening, the generator closes it with end fans (the torus
//! is the exception and stays open at its cut).
//!
//! [`Primitive`] bundles the shape parameters into one tagged value that is
//! generated against the shared [`GeometrySettings`].

pub mod box_shape;
pub mod cylinder;
pub mod disc;
pub mod lathe;
pub mod plane;
pub mod sphere;
pub mod torus;

pub use box_shape::{create_box, create_cube};
pub use cylinder::{create_cone, create_cylinder, CylinderOptions};
pub use disc::{create_disc, DiscOptions};
pub use lathe::{bezier_curve, create_curved_cylinder, CurvedCylinderOptions};
pub use plane::{create_plane, create_triangle};
pub use sphere::{create_sphere, SphereOptions};
pub use torus::{create_torus, TorusOptions};

use std::f32::consts::TAU;

use glam::Vec2;

use crate::errors::{Result, TesseraError};
use crate::resources::mesh::Mesh;
use crate::settings::{GeometrySettings, MAX_DETAIL_LEVEL, MIN_DETAIL_LEVEL};

/// Number of angular segments covered by `percent` of a full `detail` sweep.
pub(crate) fn sweep_segments(detail: u32, percent: f32) -> Result<u32> {
    if detail < MIN_DETAIL_LEVEL {
        return Err(TesseraError::InvalidGeometry(format!(
            "detail level must be at least {MIN_DETAIL_LEVEL}, got {detail}"
        )));
    }
    if detail > MAX_DETAIL_LEVEL {
        return Err(TesseraError::InvalidGeometry(format!(
            "detail level must be at most {MAX_DETAIL_LEVEL}, got {detail}"
        )));
    }
    if !percent.is_finite() || percent <= 0.0 || percent > 1.0 {
        return Err(TesseraError::InvalidGeometry(format!(
            "percent must be in (0, 1], got {percent}"
        )));
    }
    // The epsilon absorbs products like 32 × 0.3 landing just under an integer.
    let segments = (detail as f32 * percent + 1e-4).floor() as u32;
    if segments == 0 {
        return Err(TesseraError::InvalidGeometry(format!(
            "percent {percent} covers no segment at detail {detail}"
        )));
    }
    Ok(segments.min(detail))
}

#[inline]
pub(crate) fn angle_step(detail: u32) -> f32 {
    TAU / detail as f32
}

pub(crate) fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TesseraError::InvalidGeometry(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

#[inline]
pub(crate) fn vertex_index(len: usize) -> u32 {
    len as u32
}

/// A shape request generated against the engine's shared detail level.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cube,
    Sphere {
        percent: f32,
    },
    Cylinder {
        percent: f32,
        top_diameter: f32,
    },
    Cone {
        percent: f32,
    },
    Torus {
        percent: f32,
        tube_diameter: f32,
        /// Overrides the tube resolution; `None` uses the detail level.
        rings: Option<u32>,
    },
    Plane,
    Triangle {
        right_angled: bool,
    },
    Disc {
        percent: f32,
    },
    CurvedCylinder {
        control_points: Vec<Vec2>,
        percent: f32,
        diameter: f32,
    },
}

impl Primitive {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere { .. } => "Sphere",
            Self::Cylinder { .. } => "Cylinder",
            Self::Cone { .. } => "Cone",
            Self::Torus { .. } => "Torus",
            Self::Plane => "Plane",
            Self::Triangle { .. } => "Triangle",
            Self::Disc { .. } => "Disc",
            Self::CurvedCylinder { .. } => "CurvedCylinder",
        }
    }

    pub fn generate(&self, settings: &GeometrySettings) -> Result<Mesh> {
        settings.validate()?;
        let detail = settings.detail_level;

        let mesh = match self {
            Self::Cube => create_cube(),
            Self::Sphere { percent } => create_sphere(&SphereOptions {
                percent: *percent,
                detail,
                ..Default::default()
            }),
            Self::Cylinder {
                percent,
                top_diameter,
            } => create_cylinder(&CylinderOptions {
                percent: *percent,
                top_diameter: *top_diameter,
                detail,
                ..Default::default()
            }),
            Self::Cone { percent } => create_cone(&CylinderOptions {
                percent: *percent,
                detail,
                ..Default::default()
            }),
            Self::Torus {
                percent,
                tube_diameter,
                rings,
            } => create_torus(&TorusOptions {
                percent: *percent,
                tube_diameter: *tube_diameter,
                rings: *rings,
                detail,
            }),
            Self::Plane => create_plane(),
            Self::Triangle { right_angled } => create_triangle(*right_angled),
            Self::Disc { percent } => create_disc(&DiscOptions {
                percent: *percent,
                detail,
            }),
            Self::CurvedCylinder {
                control_points,
                percent,
                diameter,
            } => create_curved_cylinder(&CurvedCylinderOptions {
                control_points: control_points.clone(),
                percent: *percent,
                diameter: *diameter,
                detail,
                profile_samples: settings.lathe_detail(),
            }),
        }?;

        let degenerate = mesh.degenerate_triangle_count();
        if degenerate > 0 {
            log::debug!("{} generated with {degenerate} zero-area triangles", self.name());
        }
        Ok(mesh)
    }
}
