//! Look-direction solver
//!
//! Pure trigonometry: world-space eye/target geometry in, a two-axis
//! corrective rotation proposal in the character's local frame out. The
//! joint blender owns all state; nothing here persists between frames.

use bevy::math::{Quat, Vec3};
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::math::{lerp_clamped, map_range};

/// Raw look rotation proposal, in degrees, in the character's local frame.
///
/// Only the X (left/right deviation) and Z (vertical tilt) axes are driven;
/// the rig does not roll joints around the look axis, so Y stays zero.
///
/// Both angles come out of `atan2` calls whose second argument is clamped
/// non-positive, so they live in the ±90°..±180° band with ±180° meaning
/// "no deviation". The recorded base pose absorbs the band when the two are
/// composed by Euler addition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub struct LookAngles {
    /// Left/right deviation component, degrees
    pub x: f32,
    /// Vertical tilt component, degrees
    pub z: f32,
}

/// Computes the raw look rotation for a character facing `character_rotation`
/// whose eyes sit at `source`, looking at `target` (both world space).
///
/// Returns `None` when the target coincides with the source; the direction
/// is undefined there and the caller should hold its last valid angles
/// rather than let a NaN into the rig.
pub fn solve_look_angles(
    character_rotation: Quat,
    source: Vec3,
    target: Vec3,
) -> Option<LookAngles> {
    // Target direction in the character's local frame, negated so that
    // "forward" lands at the zero-deviation end of the angle band.
    let local = character_rotation.inverse() * (target - source);
    let dir = -local.try_normalize()?;

    // -|z| keeps the second argument non-positive, so the angle stays
    // continuous as the target crosses behind the character instead of
    // flipping at +/-180.
    let x = (-dir.x).atan2(-dir.z.abs()).to_degrees();

    // Vertical tilt blends between a Z-referenced and an X-referenced
    // tangent depending on how far around the target has swung. The
    // near-front branch ramps 0->2 over the half-range on purpose (the
    // blend is meant to complete before the 90 degree boundary; the clamp
    // inside lerp_clamped does the saturation).
    let horizontal = dir.x.atan2(dir.z).abs().to_degrees();
    let z_blend = if horizontal < 90.0 {
        (horizontal % 180.0 / 180.0) * 2.0
    } else {
        map_range(horizontal, 90.0, 180.0, 1.0, 0.0)
    };

    let z = lerp_clamped(
        dir.y.atan2(-dir.z.abs()),
        dir.y.atan2(-dir.x.abs()),
        z_blend,
    )
    .to_degrees();

    Some(LookAngles { x, z })
}
