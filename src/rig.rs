//! Look-at rig component
//!
//! ## Table of Contents
//! 1. `Section` - joint groupings that share one weight
//! 2. `CharacterLookAt` - per-rig configuration, joints and live state

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LookAtError, Result};
use crate::joint::LookAtJoint;
use crate::solver::LookAngles;
use crate::weights::WeightBudget;

/// Joint groupings that share a single section weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum Section {
    /// Left and right eye joints; weighted independently of the budget.
    Eyes,
    /// Head and neck; draws from the shared head/body budget.
    Head,
    /// Chest and spine segments; draws from the shared head/body budget.
    Body,
}

/// Applies a smoothed look-at rotation to a character rig.
///
/// Attach to the character's root entity; the root's world orientation is
/// the frame the look direction is solved in. Shared weighting between the
/// head and upper body is handled by [`WeightBudget`], local weighting by
/// each joint's own weight.
///
/// All rigs are different - a rig with other joint-axis conventions may
/// need per-joint inverts and correction offsets to behave.
#[derive(Component, Clone, Debug, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CharacterLookAt {
    /// Entity whose world position the look direction starts from
    /// (typically an eye or head anchor). Falls back to the rig's root.
    pub source: Option<Entity>,
    /// Entity to look at. With no target the rig holds its last rotation.
    pub target: Option<Entity>,

    /// Smoothing rate for the offset slerp, 1/seconds.
    pub look_at_speed: f32,
    /// 0 = layer look-at on top of animation clips, 1 = override all other
    /// movement relative to the recorded neutral pose. Continuous between.
    pub override_weight: f32,

    /// Section weight for both eye joints.
    pub eye_weight: f32,
    /// Shared head/body section budget.
    pub weights: WeightBudget,

    /// Head and neck joints.
    pub head: LookAtJoint,
    pub neck: LookAtJoint,

    /// Chest joint plus any number of spine segments below it.
    pub chest: LookAtJoint,
    pub spine: Vec<LookAtJoint>,

    /// Eye joints.
    pub right_eye: LookAtJoint,
    pub left_eye: LookAtJoint,

    /// Last valid solver output, held across degenerate frames.
    pub(crate) last_angles: Option<LookAngles>,

    /// Base poses recorded.
    pub(crate) initialized: bool,
}

impl Default for CharacterLookAt {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            look_at_speed: 1.0,
            override_weight: 0.0,
            eye_weight: 1.0,
            weights: WeightBudget::default(),
            head: LookAtJoint::unbound(),
            neck: LookAtJoint::unbound(),
            chest: LookAtJoint::unbound(),
            spine: Vec::new(),
            right_eye: LookAtJoint::unbound(),
            left_eye: LookAtJoint::unbound(),
            last_angles: None,
            initialized: false,
        }
    }
}

impl CharacterLookAt {
    /// Creates a rig tracking the given target entity.
    pub fn new(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..Default::default()
        }
    }

    /// Whether base poses have been recorded for this rig.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Checks the rig for setup mistakes the caller should fix before
    /// running. A rig with no bound joints at all is a configuration error;
    /// individual unbound joints are merely skipped.
    pub fn validate(&self) -> Result<()> {
        if self.joints().all(|(joint, _)| joint.joint.is_none()) {
            return Err(LookAtError::NoJointsBound);
        }
        Ok(())
    }

    /// Sets a section weight. Head and body writes go through the shared
    /// budget, so the other section adjusts to its complement.
    pub fn set_section_weight(&mut self, section: Section, value: f32) {
        match section {
            Section::Eyes => self.eye_weight = value,
            Section::Head => self.weights.set_head(value),
            Section::Body => self.weights.set_body(value),
        }
    }

    /// Records each bound joint's neutral local rotation, exactly once.
    ///
    /// `local_pose` resolves a joint entity to its current local rotation;
    /// unresolvable joints keep a zeroed base (degraded but non-fatal).
    /// Call after the rig sits in its neutral pose and before any frame
    /// update. Re-recording while an offset is active would corrupt all
    /// future blending, so a second call fails until [`Self::reset`].
    pub fn record_base_poses(
        &mut self,
        mut local_pose: impl FnMut(Entity) -> Option<Quat>,
    ) -> Result<()> {
        if self.initialized {
            return Err(LookAtError::AlreadyInitialized);
        }
        self.validate()?;

        for (joint, _) in self.joints_mut() {
            let Some(joint_entity) = joint.joint else {
                continue;
            };
            if let Some(rotation) = local_pose(joint_entity) {
                joint.record_base_rotation(rotation);
            }
        }

        self.initialized = true;
        Ok(())
    }

    /// Joints in per-frame update order, paired with their section weight:
    /// head, neck, chest, spine segments top to bottom, then the eyes.
    pub(crate) fn joints(&self) -> impl Iterator<Item = (&LookAtJoint, f32)> + '_ {
        let head_weight = self.weights.head();
        let body_weight = self.weights.body();
        let eye_weight = self.eye_weight;

        [(&self.head, head_weight), (&self.neck, head_weight)]
            .into_iter()
            .chain([(&self.chest, body_weight)])
            .chain(self.spine.iter().map(move |joint| (joint, body_weight)))
            .chain([(&self.right_eye, eye_weight), (&self.left_eye, eye_weight)])
    }

    /// Mutable variant of [`Self::joints`], same order.
    pub(crate) fn joints_mut(&mut self) -> impl Iterator<Item = (&mut LookAtJoint, f32)> + '_ {
        let head_weight = self.weights.head();
        let body_weight = self.weights.body();
        let eye_weight = self.eye_weight;

        [
            (&mut self.head, head_weight),
            (&mut self.neck, head_weight),
            (&mut self.chest, body_weight),
        ]
        .into_iter()
        .chain(self.spine.iter_mut().map(move |joint| (joint, body_weight)))
        .chain([
            (&mut self.right_eye, eye_weight),
            (&mut self.left_eye, eye_weight),
        ])
    }

    /// Returns the rig to its pre-initialization state: recorded poses and
    /// smoothed offsets cleared, the weight budget back at its default,
    /// base-pose recording re-armed.
    pub fn reset(&mut self) {
        for (joint, _) in self.joints_mut() {
            joint.reset();
        }
        self.weights.reset();
        self.last_angles = None;
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_rig() {
        let rig = CharacterLookAt::default();
        assert_eq!(rig.validate(), Err(LookAtError::NoJointsBound));
    }

    #[test]
    fn test_validate_accepts_single_bound_joint() {
        let mut world = World::new();
        let joint = world.spawn_empty().id();

        let mut rig = CharacterLookAt::default();
        rig.spine.push(LookAtJoint::new(joint).with_weight(0.5));
        assert!(rig.validate().is_ok());
    }

    #[test]
    fn test_joint_order_and_section_weights() {
        let mut rig = CharacterLookAt::default();
        rig.eye_weight = 0.25;
        rig.weights.set_head(0.7);
        rig.spine.push(LookAtJoint::unbound());
        rig.spine.push(LookAtJoint::unbound());

        let weights: Vec<f32> = rig.joints().map(|(_, weight)| weight).collect();
        // head, neck, chest, spine x2, right eye, left eye
        assert_eq!(weights.len(), 7);
        assert!((weights[0] - 0.7).abs() < 1e-6);
        assert!((weights[1] - 0.7).abs() < 1e-6);
        for weight in &weights[2..5] {
            assert!((weight - 0.3).abs() < 1e-6);
        }
        assert!((weights[5] - 0.25).abs() < 1e-6);
        assert!((weights[6] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_set_section_weight_routes_to_budget() {
        let mut rig = CharacterLookAt::default();
        rig.set_section_weight(Section::Body, 0.8);
        assert!((rig.weights.head() - 0.2).abs() < 1e-6);

        rig.set_section_weight(Section::Eyes, 0.4);
        assert!((rig.eye_weight - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_record_base_poses_is_one_shot() {
        let mut world = World::new();
        let joint = world.spawn_empty().id();

        let mut rig = CharacterLookAt::default();
        rig.head = LookAtJoint::new(joint).with_weight(1.0);

        let pose = crate::math::quat_from_euler_deg(Vec3::new(15.0, 0.0, 0.0));
        rig.record_base_poses(|_| Some(pose)).unwrap();
        assert!((rig.head.base_rotation().x - 15.0).abs() < 1e-2);

        // Second record is refused until reset.
        assert_eq!(
            rig.record_base_poses(|_| Some(Quat::IDENTITY)),
            Err(LookAtError::AlreadyInitialized)
        );

        rig.reset();
        rig.record_base_poses(|_| Some(Quat::IDENTITY)).unwrap();
        assert!(rig.head.base_rotation().x.abs() < 1e-3);
    }

    #[test]
    fn test_record_base_poses_skips_unresolvable_joints() {
        let mut world = World::new();
        let head = world.spawn_empty().id();
        let neck = world.spawn_empty().id();

        let mut rig = CharacterLookAt::default();
        rig.head = LookAtJoint::new(head);
        rig.neck = LookAtJoint::new(neck);

        let pose = crate::math::quat_from_euler_deg(Vec3::new(30.0, 0.0, 0.0));
        rig.record_base_poses(|entity| (entity == head).then_some(pose))
            .unwrap();

        assert!((rig.head.base_rotation().x - 30.0).abs() < 1e-2);
        // The neck keeps its zeroed base - degraded, never fatal.
        assert_eq!(rig.neck.base_rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_reset_rearms_initialization() {
        let mut rig = CharacterLookAt::default();
        rig.initialized = true;
        rig.last_angles = Some(crate::solver::LookAngles { x: 120.0, z: -90.0 });
        rig.weights.set_head(0.1);

        rig.reset();
        assert!(!rig.is_initialized());
        assert!(rig.last_angles.is_none());
        assert_eq!(rig.weights, WeightBudget::default());
    }
}
