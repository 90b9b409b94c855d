//! Error types for gaze-rig
//!
//! Setup-time misconfiguration is the only place an error crosses the
//! library boundary; per-frame code degrades to "skip this joint this
//! frame" instead.

use thiserror::Error;

/// Result type alias for look-at operations
pub type Result<T> = std::result::Result<T, LookAtError>;

/// Errors raised while binding a look-at rig
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookAtError {
    /// The rig was spawned without a single bound joint handle
    #[error("look-at rig has no joints bound")]
    NoJointsBound,

    /// Base poses were already recorded for this rig. Re-recording while an
    /// offset is active would corrupt all future blending; call
    /// `CharacterLookAt::reset` first.
    #[error("base pose already recorded; call reset() before re-initializing")]
    AlreadyInitialized,
}
