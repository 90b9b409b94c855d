//! Numeric helpers shared by the solver and the joint blender
//!
//! ## Table of Contents
//! 1. Range remap + clamped interpolation
//! 2. Euler-degree bridge (quaternion <-> degrees)
//! 3. Flat-plane distance helpers

use bevy::math::{EulerRot, Quat, Vec3};

// ============================================================================
// Range remap + clamped interpolation
// ============================================================================

/// Maps a value in one range of numbers to a value in another range.
///
/// e.g. `0.5` in a range from 0 to 1, converted to a range from -1 to 1,
/// returns 0. An empty input range with `out_min == 0` returns `out_max`.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min && out_min == 0.0 {
        out_max
    } else {
        (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
    }
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Shortest-arc spherical interpolation with `t` clamped to [0, 1].
///
/// A saturating step (`dt * speed >= 1`) lands exactly on `to` instead of
/// overshooting past it.
pub fn slerp_clamped(from: Quat, to: Quat, t: f32) -> Quat {
    from.slerp(to, t.clamp(0.0, 1.0))
}

// ============================================================================
// Euler-degree bridge
// ============================================================================

/// Builds a rotation from Euler angles in degrees (YXZ intrinsic order).
pub fn quat_from_euler_deg(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Extracts Euler angles in degrees (YXZ intrinsic order) from a rotation.
pub fn euler_deg_from_quat(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Composes two rotations by component-wise Euler-angle addition.
///
/// Numerically fragile near gimbal singularities; the additive/override
/// blend goes through this one operation so the composition rule can be
/// swapped without touching the blender.
pub fn compose_euler_deg(a: Vec3, b: Vec3) -> Quat {
    quat_from_euler_deg(a + b)
}

// ============================================================================
// Flat-plane distance helpers
// ============================================================================

/// Flattens `point` onto the plane through `reference` with the given
/// `normal`, sliding along the normal direction.
pub fn flat_point(point: Vec3, reference: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq <= f32::EPSILON {
        return point;
    }
    point + normal * ((reference - point).dot(normal) / len_sq)
}

/// Distance of two points as if both sat on the plane with the given normal.
pub fn flat_distance(a: Vec3, b: Vec3, normal: Vec3) -> f32 {
    a.distance(flat_point(b, a, normal))
}

/// Manhattan distance between two points.
pub fn manhattan_distance(a: Vec3, b: Vec3) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}

/// Manhattan distance with `b` flattened onto `a`'s plane first.
pub fn flat_manhattan_distance(a: Vec3, b: Vec3, normal: Vec3) -> f32 {
    manhattan_distance(a, flat_point(b, a, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_midpoint() {
        let mapped = map_range(0.5, 0.0, 1.0, -1.0, 1.0);
        assert!(mapped.abs() < 1e-6);
    }

    #[test]
    fn test_map_range_descending_output() {
        // The solver's far-side branch: [90, 180] -> [1, 0]
        assert!((map_range(90.0, 90.0, 180.0, 1.0, 0.0) - 1.0).abs() < 1e-6);
        assert!((map_range(135.0, 90.0, 180.0, 1.0, 0.0) - 0.5).abs() < 1e-6);
        assert!(map_range(180.0, 90.0, 180.0, 1.0, 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        assert_eq!(map_range(3.0, 2.0, 2.0, 0.0, 7.0), 7.0);
    }

    #[test]
    fn test_lerp_clamped_saturates() {
        assert_eq!(lerp_clamped(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp_clamped(0.0, 10.0, -1.0), 0.0);
        assert!((lerp_clamped(0.0, 10.0, 0.25) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_slerp_clamped_endpoints() {
        let from = Quat::IDENTITY;
        let to = Quat::from_rotation_y(1.2);
        assert!(slerp_clamped(from, to, 0.0).angle_between(from) < 1e-5);
        assert!(slerp_clamped(from, to, 5.0).angle_between(to) < 1e-5);
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = Vec3::new(25.0, -40.0, 10.0);
        let recovered = euler_deg_from_quat(quat_from_euler_deg(angles));
        assert!((recovered - angles).length() < 1e-3);
    }

    #[test]
    fn test_compose_euler_matches_sum() {
        let a = Vec3::new(10.0, 5.0, -3.0);
        let b = Vec3::new(-4.0, 20.0, 8.0);
        let composed = compose_euler_deg(a, b);
        let direct = quat_from_euler_deg(a + b);
        assert!(composed.angle_between(direct) < 1e-5);
    }

    #[test]
    fn test_flat_point_axis_normal() {
        let flattened = flat_point(Vec3::new(3.0, 9.0, -2.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!((flattened - Vec3::new(3.0, 1.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_flat_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 17.0, 4.0);
        assert!((flat_distance(a, b, Vec3::Y) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 5.0, 3.0);
        assert!((manhattan_distance(a, b) - 5.0).abs() < 1e-6);
        assert!((flat_manhattan_distance(a, b, Vec3::Y) - 2.0).abs() < 1e-6);
    }
}
