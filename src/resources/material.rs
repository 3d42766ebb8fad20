use glam::Vec4;

/// Texture key used when a material has no diffuse map of its own.
pub const DEFAULT_DIFFUSE_MAP: &str = "BLACK_DEFAULT_MAP";

/// Flat-shaded material handed to the external texture/shader system.
///
/// The diffuse map is an opaque identifier (usually a path) resolved by the
/// texture store; this crate never loads image data.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub diffuse_map: String,
}

impl Default for Material {
    /// Opaque red with white ambient and the placeholder map.
    fn default() -> Self {
        Self::from_rgba8(255, 0, 0, 255)
    }
}

impl Material {
    /// Colour material from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let mut material = Self {
            ambient: Vec4::ONE,
            diffuse: Vec4::ZERO,
            diffuse_map: DEFAULT_DIFFUSE_MAP.to_string(),
        };
        material.set_color(r, g, b, a);
        material
    }

    /// Resets to an untextured colour material.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.ambient = Vec4::ONE;
        self.diffuse = Vec4::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        );
        self.diffuse_map = DEFAULT_DIFFUSE_MAP.to_string();
    }

    /// Drops the texture and falls back to opaque red.
    pub fn clear_diffuse_map(&mut self) {
        self.diffuse_map = DEFAULT_DIFFUSE_MAP.to_string();
        self.diffuse = Vec4::new(1.0, 0.0, 0.0, 1.0);
    }

    /// Binds a diffuse texture. The tint goes black so the texture is not
    /// modulated by a leftover colour. An empty key clears the map.
    pub fn load_diffuse(&mut self, key: &str) {
        if key.is_empty() {
            self.clear_diffuse_map();
        } else {
            self.diffuse_map = key.to_string();
            self.diffuse = Vec4::new(0.0, 0.0, 0.0, 1.0);
        }
    }

    #[inline]
    #[must_use]
    pub fn has_texture(&self) -> bool {
        self.diffuse_map != DEFAULT_DIFFUSE_MAP
    }
}
