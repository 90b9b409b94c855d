//! # gaze-rig
//!
//! Procedural look-at rotation blending for articulated character rigs.
//! Given a target point and a hierarchy of skeletal joints (eyes, head,
//! neck, chest, spine segments), the plugin computes and smoothly applies
//! corrective joint rotations so a character tracks the target without
//! fighting or replacing its existing animation.
//!
//! ## Features
//! - `CharacterLookAt`: per-rig component with shared head/body weighting
//!   and per-joint local weights
//! - Time-based spherical smoothing with a continuous additive/override
//!   blend against the animated pose
//! - Per-joint inversion flags and correction offsets for mirrored rig
//!   conventions
//! - `CharacterLookAtPlugin`: records neutral poses on the rig's first
//!   frame and applies the blend post-animation, pre-propagation
//!
//! ## Table of Contents
//! 1. Error types (`error`)
//! 2. Numeric helpers (`math`)
//! 3. Look-direction solver (`solver`)
//! 4. Per-joint blending (`joint`)
//! 5. Head/body weight budget (`weights`)
//! 6. Rig component (`rig`)
//! 7. Frame systems (`systems`)
//! 8. Plugin (`plugin`)

mod error;
mod joint;
mod math;
mod plugin;
mod rig;
mod solver;
mod systems;
mod weights;

pub use error::*;
pub use joint::*;
pub use math::*;
pub use plugin::*;
pub use rig::*;
pub use solver::*;
pub use systems::*;
pub use weights::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{LookAtError, Result};
    pub use crate::joint::LookAtJoint;
    pub use crate::plugin::CharacterLookAtPlugin;
    pub use crate::rig::{CharacterLookAt, Section};
    pub use crate::solver::{solve_look_angles, LookAngles};
    pub use crate::systems::LookAtSet;
    pub use crate::weights::WeightBudget;
}
