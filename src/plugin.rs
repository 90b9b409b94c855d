//! Bevy plugin wiring for the look-at pass

use bevy::app::AnimationSystems;
use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::joint::LookAtJoint;
use crate::rig::{CharacterLookAt, Section};
use crate::solver::LookAngles;
use crate::systems::{apply_look_at, initialize_look_at_rigs, LookAtSet};
use crate::weights::WeightBudget;

/// Adds smoothed look-at rotation blending for [`CharacterLookAt`] rigs.
///
/// Base poses are recorded in `PreUpdate`, before the frame's animation
/// sampling touches the joints. The blend itself runs in `PostUpdate`,
/// after animation and before transform propagation, so corrective
/// rotations are layered on the final animated pose and are what the
/// renderer sees.
pub struct CharacterLookAtPlugin;

impl Plugin for CharacterLookAtPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterLookAt>()
            .register_type::<LookAtJoint>()
            .register_type::<WeightBudget>()
            .register_type::<LookAngles>()
            .register_type::<Section>();

        app.configure_sets(PreUpdate, LookAtSet::Initialize);
        app.configure_sets(
            PostUpdate,
            LookAtSet::Apply
                .after(AnimationSystems)
                .before(TransformSystems::Propagate),
        );

        app.add_systems(PreUpdate, initialize_look_at_rigs.in_set(LookAtSet::Initialize))
            .add_systems(PostUpdate, apply_look_at.in_set(LookAtSet::Apply));

        tracing::info!("CharacterLookAtPlugin initialized");
    }
}
