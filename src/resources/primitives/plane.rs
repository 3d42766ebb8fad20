use glam::Vec3;

use crate::errors::Result;
use crate::resources::mesh::Mesh;

/// Half thickness of the two-sided flat shapes.
pub(crate) const SHEET_HALF_THICKNESS: f32 = 0.005;

/// Unit square in the XZ plane, facing +Y.
pub fn create_plane() -> Result<Mesh> {
    let positions = vec![
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(0.5, 0.0, -0.5),
        Vec3::new(-0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, -0.5),
    ];
    Mesh::generated("Plane", positions, vec![0, 1, 3, 0, 3, 2])
}

/// Thin two-sided triangle: a -Y facing copy just below the XZ plane and a
/// +Y facing copy just above it.
///
/// The third corner sits at `(-0.5, 0)` for the isosceles variant and at
/// `(-0.5, 0.5)` for the right-angled one.
pub fn create_triangle(right_angled: bool) -> Result<Mesh> {
    let apex_z = if right_angled { 0.5 } else { 0.0 };
    let corners = [
        Vec3::new(0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, apex_z),
    ];

    let positions: Vec<Vec3> = [-SHEET_HALF_THICKNESS, SHEET_HALF_THICKNESS]
        .into_iter()
        .flat_map(|y| corners.map(|c| c + Vec3::Y * y))
        .collect();

    Mesh::generated("Triangle", positions, vec![0, 1, 2, 3, 5, 4])
}
