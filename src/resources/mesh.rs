use glam::{Vec2, Vec3};

use crate::errors::{Result, TesseraError};

/// Triangle soup: parallel position / texcoord arrays plus a triangle list.
///
/// # Invariants
///
/// - `positions.len() == tex_coords.len()`
/// - `indices.len() % 3 == 0`
/// - every index is `< positions.len()`
///
/// Geometry is immutable once built. Regenerating a shape produces a fresh
/// `Mesh` that replaces all three arrays at once through
/// [`Mesh::replace_geometry`].
///
/// # Upload layout
///
/// The byte views returned by [`Mesh::position_bytes`],
/// [`Mesh::tex_coord_bytes`] and [`Mesh::index_bytes`] are tightly packed:
/// 3 × `f32` per position, 2 × `f32` per texcoord (same vertex order), and one
/// `u32` per index grouped in triples.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    indices: Vec<u32>,
    /// Slot in the owning scene's material table.
    pub material_index: usize,
}

impl Mesh {
    /// Builds a mesh from raw buffers, validating every invariant.
    ///
    /// Missing texture coordinates default to zero for every vertex.
    pub fn from_parts(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        tex_coords: Option<Vec<Vec2>>,
        indices: Vec<u32>,
        material_index: usize,
    ) -> Result<Self> {
        let tex_coords = tex_coords.unwrap_or_else(|| vec![Vec2::ZERO; positions.len()]);
        let mesh = Self {
            name: name.into(),
            positions,
            tex_coords,
            indices,
            material_index,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Wraps generator output. Generators always emit zeroed texcoords.
    pub(crate) fn generated(name: &str, positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        Self::from_parts(name, positions, None, indices, 0)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| TesseraError::InvalidMesh {
            name: self.name.clone(),
            reason,
        };

        if self.positions.len() != self.tex_coords.len() {
            return Err(invalid(format!(
                "{} positions but {} texcoords",
                self.positions.len(),
                self.tex_coords.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(invalid(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if u32::try_from(self.positions.len()).is_err() {
            return Err(invalid("vertex count exceeds u32 range".to_string()));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= self.positions.len()) {
            return Err(invalid(format!(
                "index {bad} out of range for {} vertices",
                self.positions.len()
            )));
        }
        if let Some(p) = self.positions.iter().find(|p| !p.is_finite()) {
            return Err(invalid(format!("non-finite position {p}")));
        }
        Ok(())
    }

    /// Swaps in the geometry of `other`, keeping this mesh's name and
    /// material slot.
    pub fn replace_geometry(&mut self, other: Mesh) {
        self.positions = other.positions;
        self.tex_coords = other.tex_coords;
        self.indices = other.indices;
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Unnormalized face normal from the winding of triangle `t`
    /// (counter-clockwise is front facing).
    #[must_use]
    pub fn face_normal(&self, t: [u32; 3]) -> Vec3 {
        let a = self.positions[t[0] as usize];
        let b = self.positions[t[1] as usize];
        let c = self.positions[t[2] as usize];
        (b - a).cross(c - a)
    }

    /// Counts triangles with (near) zero area.
    #[must_use]
    pub fn degenerate_triangle_count(&self) -> usize {
        self.triangles()
            .filter(|&t| self.face_normal(t).length_squared() <= f32::EPSILON * f32::EPSILON)
            .count()
    }

    // ========================================================================
    // Upload views
    // ========================================================================

    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[must_use]
    pub fn tex_coord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_parts(
            "quad",
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            None,
            vec![0, 1, 2, 0, 2, 3],
            0,
        )
        .unwrap()
    }

    #[test]
    fn missing_texcoords_default_to_zero() {
        let mesh = quad();
        assert_eq!(mesh.tex_coords().len(), 4);
        assert!(mesh.tex_coords().iter().all(|uv| *uv == Vec2::ZERO));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::from_parts("bad", vec![Vec3::ZERO; 3], None, vec![0, 1, 3], 0);
        assert!(matches!(err, Err(TesseraError::InvalidMesh { .. })));
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = Mesh::from_parts("bad", vec![Vec3::ZERO; 3], None, vec![0, 1], 0);
        assert!(matches!(err, Err(TesseraError::InvalidMesh { .. })));
    }

    #[test]
    fn rejects_mismatched_texcoords() {
        let err = Mesh::from_parts("bad", vec![Vec3::ZERO; 3], Some(vec![Vec2::ZERO; 2]), vec![], 0);
        assert!(matches!(err, Err(TesseraError::InvalidMesh { .. })));
    }

    #[test]
    fn upload_views_are_tightly_packed() {
        let mesh = quad();
        assert_eq!(mesh.position_bytes().len(), 4 * 3 * 4);
        assert_eq!(mesh.tex_coord_bytes().len(), 4 * 2 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn replace_geometry_keeps_material() {
        let mut mesh = quad();
        mesh.material_index = 3;
        let tri = Mesh::from_parts("tri", vec![Vec3::ZERO, Vec3::X, Vec3::Y], None, vec![0, 1, 2], 0)
            .unwrap();
        mesh.replace_geometry(tri);
        assert_eq!(mesh.name, "quad");
        assert_eq!(mesh.material_index, 3);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.tex_coords().len(), 3);
    }
}
