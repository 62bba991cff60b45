//! Proportional-derivative controller.
//!
//! The derivative acts on the measured rate (cart velocity) rather than on the
//! error signal, so a step in the setpoint does not produce a derivative kick:
//!
//! `u = clamp(kp * (sp - pv) - kd * rate, limit)`

use gk_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorLimit;
use crate::error::ControlResult;

/// PD controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdController {
    /// Proportional gain (N/m).
    pub kp: f64,
    /// Derivative gain (N·s/m).
    pub kd: f64,
    /// Actuator range applied to every command.
    pub limit: ActuatorLimit,
}

impl PdController {
    /// Create a PD controller driving the standard ±50 N actuator.
    ///
    /// Gains may be any finite value; negative gains are allowed so learners
    /// can watch an unstable loop diverge.
    pub fn new(kp: f64, kd: f64) -> ControlResult<Self> {
        ensure_finite(kp, "kp")?;
        ensure_finite(kd, "kd")?;
        Ok(Self {
            kp,
            kd,
            limit: ActuatorLimit::default(),
        })
    }

    /// Replace the actuator range.
    pub fn with_limit(mut self, limit: ActuatorLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Unsaturated command.
    ///
    /// # Arguments
    ///
    /// * `pv` - Process variable (cart position)
    /// * `sp` - Setpoint (target position)
    /// * `rate` - Measured rate of the process variable (cart velocity)
    #[inline]
    pub fn raw_command(&self, pv: f64, sp: f64, rate: f64) -> f64 {
        // Error: e = sp - pv (positive error means cart is short of target)
        let error = sp - pv;
        self.kp * error - self.kd * rate
    }

    /// Saturated command actually delivered by the actuator.
    #[inline]
    pub fn update(&self, pv: f64, sp: f64, rate: f64) -> f64 {
        self.limit.saturate(self.raw_command(pv, sp, rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pd_controller_creation() {
        let pd = PdController::new(15.0, 2.0).unwrap();
        assert_eq!(pd.kp, 15.0);
        assert_eq!(pd.kd, 2.0);
        assert_eq!(pd.limit, ActuatorLimit::default());
    }

    #[test]
    fn proportional_term_only_at_rest() {
        let pd = PdController::new(15.0, 2.0).unwrap();
        // Error = 1.0 - 0.5 = 0.5, P = 7.5, no velocity
        assert_eq!(pd.update(0.5, 1.0, 0.0), 7.5);
    }

    #[test]
    fn derivative_opposes_velocity() {
        let pd = PdController::new(0.0, 4.0).unwrap();
        assert_eq!(pd.update(0.0, 0.0, 2.0), -8.0);
        assert_eq!(pd.update(0.0, 0.0, -2.0), 8.0);
    }

    #[test]
    fn output_is_clamped_but_raw_is_not() {
        let pd = PdController::new(100.0, 0.0).unwrap();
        assert_eq!(pd.raw_command(0.0, 1.0, 0.0), 100.0);
        assert_eq!(pd.update(0.0, 1.0, 0.0), 50.0);
        assert_eq!(pd.update(2.0, 1.0, 0.0), -50.0);
    }

    #[test]
    fn custom_limit() {
        let pd = PdController::new(10.0, 0.0)
            .unwrap()
            .with_limit(ActuatorLimit::symmetric(1.0).unwrap());
        assert_eq!(pd.update(0.0, 1.0, 0.0), 1.0);
    }

    #[test]
    fn invalid_gains() {
        assert!(PdController::new(f64::NAN, 1.0).is_err());
        assert!(PdController::new(1.0, f64::INFINITY).is_err());
        // Negative gains are legal
        assert!(PdController::new(-1.0, -1.0).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::actuator::ACTUATOR_LIMIT_N;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn command_never_exceeds_actuator(
            kp in -1e3_f64..1e3_f64,
            kd in -1e3_f64..1e3_f64,
            pv in -1e3_f64..1e3_f64,
            sp in -1e3_f64..1e3_f64,
            rate in -1e3_f64..1e3_f64,
        ) {
            let pd = PdController::new(kp, kd).unwrap();
            let u = pd.update(pv, sp, rate);
            prop_assert!((-ACTUATOR_LIMIT_N..=ACTUATOR_LIMIT_N).contains(&u));
        }

        #[test]
        fn unsaturated_command_passes_through(
            pv in -1.0_f64..1.0_f64,
            sp in -1.0_f64..1.0_f64,
            rate in -1.0_f64..1.0_f64,
        ) {
            // |kp*e| <= 20, |kd*rate| <= 5, so never saturated
            let pd = PdController::new(10.0, 5.0).unwrap();
            prop_assert_eq!(pd.update(pv, sp, rate), pd.raw_command(pv, sp, rate));
        }
    }
}
