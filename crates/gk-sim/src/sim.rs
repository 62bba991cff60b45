//! Simulation runner.

use rayon::prelude::*;

use crate::error::SimResult;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;
use crate::params::SimulationParameters;
use crate::trajectory::Trajectory;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Explicit Euler with the position lagging the velocity by one step (default).
    #[default]
    ForwardEuler,
    /// 4th-order Runge-Kutta, for comparison only.
    RK4,
}

/// Run one closed-loop simulation with forward Euler.
///
/// # Errors
///
/// - [`SimError::Domain`](crate::SimError::Domain) for non-positive mass, negative
///   friction, non-positive horizon or step, or any non-finite input
/// - [`SimError::InsufficientSamples`](crate::SimError::InsufficientSamples) when
///   `floor(t_max / dt) < 2`
pub fn simulate(params: &SimulationParameters) -> SimResult<Trajectory> {
    simulate_with(params, IntegratorType::ForwardEuler)
}

/// Run one closed-loop simulation with the chosen integrator.
pub fn simulate_with(
    params: &SimulationParameters,
    integrator: IntegratorType,
) -> SimResult<Trajectory> {
    let n = params.validate()?;
    let mut model = params.model()?;
    let plant = model.plant;
    let limit = model.controller.limit;

    let _span =
        tracing::debug_span!("simulate", samples = n, dt = params.dt, ?integrator).entered();

    let mut traj = Trajectory::zeroed(n, params.dt);
    let mut state = model.initial_state();
    traj.x[0] = state.x;
    traj.v[0] = state.v;

    let mut saturated_steps = 0usize;
    for k in 0..n - 1 {
        let u = model.control(&state);
        traj.u[k] = u;
        if limit.is_saturated(u) {
            saturated_steps += 1;
        }

        state = match integrator {
            IntegratorType::ForwardEuler => {
                ForwardEuler.step(&mut model, traj.t[k], &state, params.dt)?
            }
            IntegratorType::RK4 => RK4.step(&mut model, traj.t[k], &state, params.dt)?,
        };

        traj.x[k + 1] = state.x;
        traj.v[k + 1] = state.v;
        traj.energy[k + 1] = plant.kinetic_energy(state.v);
    }

    tracing::debug!(
        saturated_steps,
        final_x = state.x,
        final_v = state.v,
        "simulation complete"
    );

    Ok(traj)
}

/// Run independent simulations in parallel.
///
/// Results come back in input order; one failing request does not affect the others.
pub fn simulate_batch(params: &[SimulationParameters]) -> Vec<SimResult<Trajectory>> {
    tracing::debug!(runs = params.len(), "simulating batch");
    params.par_iter().map(simulate).collect()
}
