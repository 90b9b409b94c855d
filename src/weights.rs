//! Head/body weight budget
//!
//! The head group (head + neck) and the body group (chest + spine) share a
//! single weight budget: the two section weights always sum to 1. The
//! budget is a value type with push-based setters, so the invariant is
//! enforced at the write instead of being re-detected by per-frame polling.

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Default share of the budget given to the head group.
pub const DEFAULT_HEAD_WEIGHT: f32 = 0.6;

/// Complement-locked pair of section weights.
///
/// `head() + body() == 1` holds after every write; whichever setter ran
/// last wins. Callers that write both sections in one update should write
/// the body value last - the body write takes precedence by contract.
///
/// Values are not range-validated beyond the [0, 1] semantic contract;
/// out-of-range inputs produce visibly wrong but non-fatal output.
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WeightBudget {
    head: f32,
    body: f32,
}

impl Default for WeightBudget {
    fn default() -> Self {
        Self::new(DEFAULT_HEAD_WEIGHT)
    }
}

impl WeightBudget {
    /// Creates a budget giving `head` to the head group and the remainder
    /// to the body group.
    pub fn new(head: f32) -> Self {
        Self {
            head,
            body: 1.0 - head,
        }
    }

    /// The head group's share.
    pub fn head(&self) -> f32 {
        self.head
    }

    /// The body group's share.
    pub fn body(&self) -> f32 {
        self.body
    }

    /// Sets the head share; the body share becomes its complement.
    pub fn set_head(&mut self, value: f32) {
        self.head = value;
        self.body = 1.0 - value;
    }

    /// Sets the body share; the head share becomes its complement.
    pub fn set_body(&mut self, value: f32) {
        self.body = value;
        self.head = 1.0 - value;
    }

    /// Restores the default split. Pair with rig re-initialization.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
