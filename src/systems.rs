//! Frame systems for look-at rigs
//!
//! ## Table of Contents
//! 1. `LookAtSet` - system sets for ordering against the host schedule
//! 2. `initialize_look_at_rigs` - one-shot base-pose recording
//! 3. `apply_look_at` - per-frame solve + blend + write-back

use bevy::prelude::*;
use tracing::{trace, warn};

use crate::rig::CharacterLookAt;
use crate::solver::solve_look_angles;

/// System sets for the look-at pass.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookAtSet {
    /// Base-pose recording for freshly spawned rigs (early phase).
    Initialize,
    /// Solve and write joint rotations (late phase, post-animation).
    Apply,
}

/// Records each joint's neutral local rotation the first frame a rig is
/// seen, before that frame's animation runs.
///
/// Recording happens exactly once per rig; joints without a bound entity
/// keep a zeroed base rotation, which looks wrong but never crashes. A rig
/// with no bound joints at all is reported once and left inert.
pub fn initialize_look_at_rigs(
    mut rigs: Query<(Entity, &mut CharacterLookAt)>,
    transforms: Query<&Transform>,
) {
    for (entity, mut rig) in rigs.iter_mut() {
        if rig.initialized {
            continue;
        }

        let recorded = rig.record_base_poses(|joint_entity| {
            transforms
                .get(joint_entity)
                .map(|transform| transform.rotation)
                .ok()
        });

        match recorded {
            Ok(()) => trace!("look-at rig on {:?} recorded base poses", entity),
            Err(error) => {
                warn!("look-at rig on {:?} is misconfigured: {}", entity, error);
                // Mark it anyway so the warning fires once; apply_look_at
                // will have nothing to write to.
                rig.initialized = true;
            }
        }
    }
}

/// Solves the look direction for every rig and blends the corrective
/// rotation into each joint's animated local pose.
///
/// Runs in the late phase: after animation sampling, before transform
/// propagation, so the write-back is what the renderer sees. All per-frame
/// failures degrade to "leave this joint alone this frame".
pub fn apply_look_at(
    time: Res<Time>,
    mut rigs: Query<(Entity, &mut CharacterLookAt)>,
    globals: Query<&GlobalTransform>,
    mut joints: Query<&mut Transform>,
) {
    // A clock that ran backwards is treated as a zero-length frame; a huge
    // stall saturates the slerp step and snaps.
    let dt = time.delta_secs().max(0.0);

    for (entity, mut rig) in rigs.iter_mut() {
        if !rig.initialized {
            continue;
        }

        let Ok(character) = globals.get(entity) else {
            trace!("look-at rig on {:?} has no global transform", entity);
            continue;
        };
        let character_rotation = character.rotation();

        let source_position = rig
            .source
            .and_then(|source| globals.get(source).ok())
            .map(|global| global.translation())
            .unwrap_or_else(|| character.translation());

        let target_position = rig
            .target
            .and_then(|target| globals.get(target).ok())
            .map(|global| global.translation());

        // A missing target or a target sitting exactly on the source keeps
        // the last valid angles, so smoothing continues instead of feeding
        // NaN into the rig.
        let solved = target_position
            .and_then(|target| solve_look_angles(character_rotation, source_position, target));
        let angles = match solved {
            Some(angles) => {
                rig.last_angles = Some(angles);
                angles
            }
            None => match rig.last_angles {
                Some(held) => held,
                None => continue,
            },
        };

        let step = dt * rig.look_at_speed;
        let override_weight = rig.override_weight;

        for (joint, section_weight) in rig.joints_mut() {
            joint.update_offset(angles, section_weight, step);

            let Some(joint_entity) = joint.joint else {
                continue;
            };
            let Ok(mut transform) = joints.get_mut(joint_entity) else {
                trace!("look-at joint {:?} lost its transform", joint_entity);
                continue;
            };

            let animated = transform.rotation;
            transform.rotation = joint.blended_rotation(animated, override_weight);
        }
    }
}
