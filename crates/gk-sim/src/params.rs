//! Simulation request parameters.

use gk_controls::PdController;
use gk_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::plant::{CartModel, CartPlant, CartState};

/// Fewest samples a trajectory may hold.
pub const MIN_SAMPLES: usize = 2;

/// Upper bound on `floor(t_max / dt)`; guards against runaway allocations.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Everything one simulation run needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Cart mass (kg)
    pub mass: f64,
    /// Viscous friction coefficient (N·s/m)
    pub friction: f64,
    /// Proportional gain
    pub kp: f64,
    /// Derivative gain
    pub kd: f64,
    /// Target position (m)
    pub x_ref: f64,
    /// Initial position (m)
    pub x0: f64,
    /// Initial velocity (m/s)
    pub v0: f64,
    /// Time horizon (s)
    pub t_max: f64,
    /// Fixed step (s)
    pub dt: f64,
}

impl SimulationParameters {
    /// Cart at rest at the origin, 5 s horizon with 10 ms steps.
    pub fn new(mass: f64, friction: f64, kp: f64, kd: f64, x_ref: f64) -> Self {
        Self {
            mass,
            friction,
            kp,
            kd,
            x_ref,
            x0: 0.0,
            v0: 0.0,
            t_max: 5.0,
            dt: 0.01,
        }
    }

    pub fn for_plant(plant: CartPlant, kp: f64, kd: f64, x_ref: f64) -> Self {
        Self::new(plant.mass, plant.friction, kp, kd, x_ref)
    }

    pub fn with_initial(mut self, x0: f64, v0: f64) -> Self {
        self.x0 = x0;
        self.v0 = v0;
        self
    }

    pub fn with_horizon(mut self, t_max: f64, dt: f64) -> Self {
        self.t_max = t_max;
        self.dt = dt;
        self
    }

    pub fn with_gains(mut self, kp: f64, kd: f64) -> Self {
        self.kp = kp;
        self.kd = kd;
        self
    }

    /// `floor(t_max / dt)`, saturating at zero for negative ratios and at
    /// `usize::MAX` when the ratio overflows.
    pub fn sample_count(&self) -> usize {
        let ratio = (self.t_max / self.dt).floor();
        if ratio.is_nan() || ratio <= 0.0 {
            0
        } else {
            // float-to-int casts saturate, so +inf maps to usize::MAX
            ratio as usize
        }
    }

    pub fn plant(&self) -> SimResult<CartPlant> {
        CartPlant::new(self.mass, self.friction)
    }

    /// Check every input and return the sample count.
    pub fn validate(&self) -> SimResult<usize> {
        for (value, what) in [
            (self.kp, "kp must be finite"),
            (self.kd, "kd must be finite"),
            (self.x_ref, "x_ref must be finite"),
            (self.x0, "x0 must be finite"),
            (self.v0, "v0 must be finite"),
            (self.t_max, "t_max must be finite"),
            (self.dt, "dt must be finite"),
        ] {
            ensure_finite(value, what)?;
        }
        self.plant()?;
        if self.t_max <= 0.0 {
            return Err(SimError::Domain {
                what: "t_max must be positive",
            });
        }
        if self.dt <= 0.0 {
            return Err(SimError::Domain {
                what: "dt must be positive",
            });
        }
        let samples = self.sample_count();
        if samples < MIN_SAMPLES {
            return Err(SimError::InsufficientSamples {
                samples,
                t_max: self.t_max,
                dt: self.dt,
            });
        }
        if samples > MAX_SAMPLES {
            return Err(SimError::Domain {
                what: "t_max / dt exceeds the sample limit",
            });
        }
        Ok(samples)
    }

    /// Closed-loop model for these parameters.
    pub fn model(&self) -> SimResult<CartModel> {
        let plant = self.plant()?;
        let controller = PdController::new(self.kp, self.kd)?;
        Ok(CartModel::new(
            plant,
            controller,
            self.x_ref,
            CartState {
                x: self.x0,
                v: self.v0,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0);
        assert_eq!(p.x0, 0.0);
        assert_eq!(p.v0, 0.0);
        assert_eq!(p.t_max, 5.0);
        assert_eq!(p.dt, 0.01);
        assert_eq!(p.sample_count(), 500);
    }

    #[test]
    fn builders() {
        let p = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0)
            .with_initial(0.3, -0.1)
            .with_horizon(2.0, 0.5)
            .with_gains(25.0, 8.0);
        assert_eq!((p.x0, p.v0), (0.3, -0.1));
        assert_eq!(p.sample_count(), 4);
        assert_eq!((p.kp, p.kd), (25.0, 8.0));
    }

    #[test]
    fn sample_count_floors() {
        // 0.3 / 0.1 is 2.9999999999999996 in binary floating point
        let p = SimulationParameters::new(1.0, 0.0, 1.0, 1.0, 1.0).with_horizon(0.3, 0.1);
        assert_eq!(p.sample_count(), 2);
    }

    #[test]
    fn validation_order() {
        let base = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0);
        assert_eq!(base.validate().unwrap(), 500);

        let err = SimulationParameters { mass: 0.0, ..base }.validate().unwrap_err();
        assert_eq!(
            err,
            SimError::Domain {
                what: "mass must be positive"
            }
        );

        let err = base.with_horizon(1.0, 2.0).validate().unwrap_err();
        assert!(matches!(err, SimError::InsufficientSamples { samples: 0, .. }));

        let err = base.with_horizon(1.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, SimError::Domain { .. }));

        let err = base.with_horizon(-1.0, 0.01).validate().unwrap_err();
        assert!(matches!(err, SimError::Domain { .. }));

        let err = base.with_initial(f64::NAN, 0.0).validate().unwrap_err();
        assert_eq!(
            err,
            SimError::Domain {
                what: "x0 must be finite"
            }
        );

        let err = base.with_horizon(1e9, 1e-3).validate().unwrap_err();
        assert!(matches!(err, SimError::Domain { .. }));
    }

    #[test]
    fn overflowing_horizon_hits_sample_limit() {
        let p = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0).with_horizon(1e300, 1e-10);
        assert!((p.t_max / p.dt).is_infinite());
        assert_eq!(p.sample_count(), usize::MAX);
        assert!(matches!(p.validate(), Err(SimError::Domain { .. })));
    }

    #[test]
    fn exactly_two_samples_is_enough() {
        let p = SimulationParameters::new(1.0, 0.0, 1.0, 1.0, 1.0).with_horizon(1.0, 0.5);
        assert_eq!(p.validate().unwrap(), 2);
    }
}
