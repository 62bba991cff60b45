//! Actuator saturation.
//!
//! The motor driving the cart cannot deliver more than [`ACTUATOR_LIMIT_N`]
//! newtons in either direction. Commands beyond that are clamped without
//! complaint, which is how a real drive behaves.

use gk_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Peak actuator force magnitude (N).
pub const ACTUATOR_LIMIT_N: f64 = 50.0;

/// Output range of a saturating actuator.
///
/// # Example
///
/// ```
/// use gk_controls::{ActuatorLimit, ACTUATOR_LIMIT_N};
///
/// let limit = ActuatorLimit::default();
/// assert_eq!(limit.saturate(120.0), ACTUATOR_LIMIT_N);
/// assert_eq!(limit.saturate(-3.0), -3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActuatorLimit {
    /// Most negative deliverable force (N).
    pub min: f64,
    /// Most positive deliverable force (N).
    pub max: f64,
}

impl Default for ActuatorLimit {
    fn default() -> Self {
        Self {
            min: -ACTUATOR_LIMIT_N,
            max: ACTUATOR_LIMIT_N,
        }
    }
}

impl ActuatorLimit {
    /// Create an actuator range.
    ///
    /// # Errors
    ///
    /// Returns error if a bound is not finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> ControlResult<Self> {
        ensure_finite(min, "actuator min")?;
        ensure_finite(max, "actuator max")?;
        if min >= max {
            return Err(ControlError::InvalidArg {
                what: "actuator min must be less than max",
            });
        }
        Ok(Self { min, max })
    }

    /// Symmetric range `[-limit, limit]`.
    pub fn symmetric(limit: f64) -> ControlResult<Self> {
        Self::new(-limit, limit)
    }

    /// Clamp a raw command into the deliverable range.
    #[inline]
    pub fn saturate(&self, raw: f64) -> f64 {
        raw.clamp(self.min, self.max)
    }

    /// True when `value` sits on either bound.
    pub fn is_saturated(&self, value: f64) -> bool {
        value <= self.min || value >= self.max
    }
}
