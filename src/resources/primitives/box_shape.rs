use glam::Vec3;

use super::ensure_positive;
use crate::errors::Result;
use crate::resources::mesh::Mesh;

/// Axis-aligned box centred on the origin.
///
/// Faces do not share vertices, so each corner appears once per adjacent
/// face (24 vertices, 12 triangles).
pub fn create_box(width: f32, height: f32, depth: f32) -> Result<Mesh> {
    ensure_positive("width", width)?;
    ensure_positive("height", height)?;
    ensure_positive("depth", depth)?;

    let w = width / 2.0;
    let h = height / 2.0;
    let d = depth / 2.0;

    let positions = vec![
        // Front face (+Z)
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
        // Back face (-Z)
        Vec3::new(-w, -h, -d),
        Vec3::new(-w, h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(w, -h, -d),
        // Top face (+Y)
        Vec3::new(-w, h, -d),
        Vec3::new(-w, h, d),
        Vec3::new(w, h, d),
        Vec3::new(w, h, -d),
        // Bottom face (-Y)
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, -h, d),
        Vec3::new(-w, -h, d),
        // Right face (+X)
        Vec3::new(w, -h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(w, h, d),
        Vec3::new(w, -h, d),
        // Left face (-X)
        Vec3::new(-w, -h, -d),
        Vec3::new(-w, -h, d),
        Vec3::new(-w, h, d),
        Vec3::new(-w, h, -d),
    ];

    // Two CCW triangles per face: 0, 1, 2,  0, 2, 3
    let indices: Vec<u32> = (0..6)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    Mesh::generated("Cube", positions, indices)
}

/// Unit cube spanning `[-0.5, 0.5]` on every axis.
pub fn create_cube() -> Result<Mesh> {
    create_box(1.0, 1.0, 1.0)
}
