//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Forward Euler (explicit, 1st order).
///
/// Every state component advances from the derivative at the start of the
/// step, so the cart's position moves with the velocity it had *before* the
/// step's acceleration was applied. Large `dt` relative to the loop's time
/// constants grows oscillations instead of damping them; that behavior is
/// part of what the tool lets learners see.
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
///
/// Opt-in reference for comparing against the Euler trajectories.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = -x
    struct Decay;

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    #[test]
    fn forward_euler_single_step() {
        let mut model = Decay;
        let x = ForwardEuler.step(&mut model, 0.0, &1.0, 0.1).unwrap();
        assert_eq!(x, 0.9);
    }

    #[test]
    fn rk4_beats_euler_on_decay() {
        let exact = (-1.0_f64).exp();
        let mut model = Decay;
        let (mut xe, mut xr) = (1.0, 1.0);
        for k in 0..10 {
            let t = k as f64 * 0.1;
            xe = ForwardEuler.step(&mut model, t, &xe, 0.1).unwrap();
            xr = RK4.step(&mut model, t, &xr, 0.1).unwrap();
        }
        assert!((xr - exact).abs() < 1e-6);
        assert!((xe - exact).abs() > 1e-3);
    }
}
