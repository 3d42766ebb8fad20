use glam::{Quat, Vec3, Vec4};

/// A channel value that keyframe tracks can blend.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Shortest-arc blend. Only meaningful for rotations; other values fall
    /// back to the linear blend.
    fn interpolate_spherical(start: Self, end: Self, t: f32) -> Self {
        Self::interpolate_linear(start, end, t)
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Componentwise blend of the four quaternion components. The result is
    /// not renormalized, matching content authored against this blend.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        let blended = Vec4::from(start).lerp(Vec4::from(end), t);
        Quat::from_vec4(blended)
    }

    fn interpolate_spherical(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quat_linear_is_componentwise() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_z(FRAC_PI_2);
        let mid = Quat::interpolate_linear(a, b, 0.5);
        let expected = (Vec4::from(a) + Vec4::from(b)) * 0.5;
        assert!(Vec4::from(mid).abs_diff_eq(expected, 1e-6));
        // Componentwise midpoint of two unit quaternions is shorter than 1.
        assert!(mid.length() < 1.0);
    }

    #[test]
    fn quat_spherical_stays_normalized() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_z(FRAC_PI_2);
        let mid = Quat::interpolate_spherical(a, b, 0.5);
        assert!((mid.length() - 1.0).abs() < 1e-5);
        assert!(mid.abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2 / 2.0), 1e-5));
    }
}
