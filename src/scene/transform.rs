use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

/// Transform component
///
/// Position, rotation and scale are canonical. The local matrix is derived
/// from them (scale first, then rotation, then translation) and cached behind
/// a shadow-state dirty check, so it is only rebuilt when a field changed.
#[derive(Debug, Clone)]
pub struct Transform {
    // === Public fields ===
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    // === Matrix cache ===
    local_matrix: Mat4,

    // === Shadow state ===
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::from_trs(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    #[must_use]
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            local_matrix: Mat4::IDENTITY,
            last_position: position,
            last_rotation: rotation,
            last_scale: scale,
            force_update: true,
        }
    }

    /// Decomposes `matrix` into TRS. Shear is lost.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self::from_trs(position, rotation, scale)
    }

    // ========================================================================
    // Shadow state check
    // ========================================================================

    /// Rebuilds the local matrix if any field changed since the last call.
    /// Returns whether it was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix = self.compose();

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// The TRS matrix of the current fields, bypassing the cache.
    ///
    /// `rotation` may hold an unnormalized blend written by animation; the
    /// matrix is built from its direction only. A zero-length rotation
    /// composes as identity.
    #[inline]
    #[must_use]
    pub fn compose(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.unit_rotation(), self.position)
    }

    /// `rotation` scaled to unit length.
    #[must_use]
    pub fn unit_rotation(&self) -> Quat {
        Vec4::from(self.rotation)
            .try_normalize()
            .map_or(Quat::IDENTITY, Quat::from_vec4)
    }

    /// Cached local matrix as of the last [`Transform::update_local_matrix`].
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// Overwrites all three fields from a matrix.
    pub fn apply_local_matrix(&mut self, matrix: Mat4) {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.position = translation;
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.force_update
            || self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
    }

    // ========================================================================
    // Delta edits
    // ========================================================================

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Pre-multiplies `delta` onto the current rotation. The position is left
    /// alone, so the node turns in place around its pivot.
    pub fn rotate(&mut self, delta: Quat) {
        self.rotation = (delta * self.rotation).normalize();
    }

    /// Rotates about X, then Y, then Z (radians).
    pub fn rotate_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotate(Quat::from_euler(EulerRot::ZYX, z, y, x));
    }

    /// Scales the node and its offset from the parent alike.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.position *= factor;
    }

    // ========================================================================
    // Absolute edits
    // ========================================================================

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    #[inline]
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Absolute rotation about X, then Y, then Z (radians), the same order
    /// as [`Transform::rotate_euler`].
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::ZYX, z, y, x);
    }

    /// Inverse of [`Transform::set_rotation_euler`], as `(x, y, z)`.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (z, y, x) = self.unit_rotation().to_euler(EulerRot::ZYX);
        Vec3::new(x, y, z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
