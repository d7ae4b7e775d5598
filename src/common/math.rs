// Math utilities and helper functions

use glam::Vec2;

/// 2D scalar cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Rotate a local offset by `angle` radians (counter-clockwise)
#[inline]
pub fn rotate(offset: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

/// Sign of `value` as -1.0 or 1.0 (zero counts as positive)
#[inline]
pub fn sign_toward(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_cross() {
        assert_eq!(cross(Vec2::X, Vec2::Y), 1.0);
        assert_eq!(cross(Vec2::Y, Vec2::X), -1.0);
        assert_eq!(cross(Vec2::new(2.0, 0.0), Vec2::new(4.0, 0.0)), 0.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!(rotated.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-6));
    }

    #[test]
    fn test_sign_toward() {
        assert_eq!(sign_toward(-0.5), -1.0);
        assert_eq!(sign_toward(0.0), 1.0);
        assert_eq!(sign_toward(3.0), 1.0);
    }
}
