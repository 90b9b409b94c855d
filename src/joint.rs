//! Per-joint look-at state and blending
//!
//! ## Table of Contents
//! 1. `LookAtJoint` - configuration + live smoothing state for one joint
//! 2. Per-frame operations: offset smoothing, additive/override composition

use bevy::math::{Quat, Vec3};
use bevy::prelude::Entity;
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::math::{compose_euler_deg, euler_deg_from_quat, quat_from_euler_deg, slerp_clamped};
use crate::solver::LookAngles;

/// One skeletal joint participating in look-at, plus the data used to blend
/// its corrective rotation.
///
/// The joint entity itself is owned by the host rig; this struct only holds
/// a non-owning handle next to the tuning values and the smoothed offset
/// that persists across frames.
#[derive(Clone, Debug, Default, Reflect, Serialize, Deserialize)]
pub struct LookAtJoint {
    /// Handle to the externally owned joint entity. `None` joints are
    /// skipped at recording and update time.
    pub joint: Option<Entity>,

    /// Correction offset applied on top of the look rotation, degrees.
    /// Author-tunable bias for rigs whose joint axes are not quite aligned.
    pub correction_offset: Vec3,

    /// This joint's local weight within its body section, 0 to 1.
    pub weight: f32,

    /// Sign flip for the solver's x angle (mirrored rig conventions).
    pub invert_x: bool,
    /// Sign flip for the solver's z angle.
    pub invert_z: bool,

    /// Neutral "look forward" pose, degrees. Recorded exactly once, before
    /// any look-at rotation touches the joint, and never recomputed.
    base_rot: Vec3,

    /// Smoothed offset rotation, updated every frame.
    current_offset: Quat,

    /// `current_offset` attenuated by local and section weights.
    current_offset_weighted: Quat,
}

impl LookAtJoint {
    /// Creates a joint entry bound to the given entity.
    pub fn new(joint: Entity) -> Self {
        Self {
            joint: Some(joint),
            ..Default::default()
        }
    }

    /// Creates an unbound entry; the rig skips it without raising an error.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Sets the joint's local weight within its section.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the static correction offset, degrees.
    pub fn with_correction(mut self, offset: Vec3) -> Self {
        self.correction_offset = offset;
        self
    }

    /// Flips the solver's x angle for this joint.
    pub fn with_invert_x(mut self) -> Self {
        self.invert_x = true;
        self
    }

    /// Flips the solver's z angle for this joint.
    pub fn with_invert_z(mut self) -> Self {
        self.invert_z = true;
        self
    }

    /// Records the joint's current local rotation as its neutral pose.
    pub fn record_base_rotation(&mut self, local_rotation: Quat) {
        self.base_rot = euler_deg_from_quat(local_rotation);
    }

    /// The recorded neutral pose, degrees.
    pub fn base_rotation(&self) -> Vec3 {
        self.base_rot
    }

    /// The weighted offset currently applied to the joint.
    pub fn current_offset_weighted(&self) -> Quat {
        self.current_offset_weighted
    }

    /// Advances the smoothed offset toward the solved look rotation.
    ///
    /// `step` is `dt * look_at_speed`; values past 1 saturate inside the
    /// slerp so a stalled frame snaps to the target instead of overshooting.
    pub fn update_offset(&mut self, angles: LookAngles, section_weight: f32, step: f32) {
        let x = if self.invert_x { -angles.x } else { angles.x };
        let z = if self.invert_z { -angles.z } else { angles.z };

        // Rotate from the neutral pose by the look rotation plus the
        // authored correction.
        let target = Vec3::new(
            self.base_rot.x + x + self.correction_offset.x,
            self.base_rot.y + self.correction_offset.y,
            self.base_rot.z + z + self.correction_offset.z,
        );

        self.current_offset = slerp_clamped(self.current_offset, quat_from_euler_deg(target), step);

        // Attenuate the rotation itself toward identity rather than scaling
        // Euler components; a linear scale would pick up gimbal artifacts.
        self.current_offset_weighted = slerp_clamped(
            Quat::IDENTITY,
            self.current_offset,
            self.weight * section_weight,
        );
    }

    /// Composes the final local rotation against the live animated pose.
    ///
    /// `override_weight` slides between layering the offset on top of the
    /// animated pose (0) and replacing animation relative to the recorded
    /// neutral pose (1).
    pub fn blended_rotation(&self, animated: Quat, override_weight: f32) -> Quat {
        let weighted = euler_deg_from_quat(self.current_offset_weighted);

        let additive = compose_euler_deg(euler_deg_from_quat(animated), weighted);
        let overridden = compose_euler_deg(self.base_rot, weighted);

        slerp_clamped(additive, overridden, override_weight)
    }

    /// Clears recorded and smoothed state back to the pre-init defaults.
    pub fn reset(&mut self) {
        self.base_rot = Vec3::ZERO;
        self.current_offset = Quat::IDENTITY;
        self.current_offset_weighted = Quat::IDENTITY;
    }
}
