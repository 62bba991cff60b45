//! Performance metrics derived from a trajectory.
//!
//! All functions are pure; nothing here is cached.

use gk_sim::Trajectory;
use serde::{Deserialize, Serialize};

use crate::config::GatekeeperConfig;
use crate::error::{AppError, AppResult};

/// The three numbers the gatekeeper judges a design on, plus peak kinetic energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Wall position minus farthest position reached (m). `<= 0` is a collision.
    pub safety_margin: f64,
    /// Last time the cart was outside the arrival band (s)
    pub settling_time_s: f64,
    /// Scaled sum of absolute actuator force
    pub actuation_cost: f64,
    /// Largest kinetic energy reached (J)
    pub peak_energy_j: f64,
}

impl PerformanceMetrics {
    pub fn compute(traj: &Trajectory, config: &GatekeeperConfig) -> AppResult<Self> {
        Ok(Self {
            safety_margin: safety_margin(traj, config.wall_position)?,
            settling_time_s: settling_time(traj, config.x_ref, config.settle_tolerance),
            actuation_cost: actuation_cost(traj, config.cost_scale),
            peak_energy_j: traj.peak_energy().ok_or_else(empty_trajectory)?,
        })
    }

    /// True when the cart reached or passed the wall.
    pub fn collided(&self) -> bool {
        self.safety_margin <= 0.0
    }
}

fn empty_trajectory() -> AppError {
    AppError::InvalidInput("trajectory has no samples".into())
}

/// `wall - max(x)`
pub fn safety_margin(traj: &Trajectory, wall: f64) -> AppResult<f64> {
    let peak = traj.max_position().ok_or_else(empty_trajectory)?;
    Ok(wall - peak)
}

/// Time of the last sample with `|x - x_ref| >= tolerance`, or 0 if there is none.
///
/// This is "last time ever outside", not "first time inside": a cart that
/// leaves the band late and comes back reports the late excursion.
/// Non-finite positions count as outside.
pub fn settling_time(traj: &Trajectory, x_ref: f64, tolerance: f64) -> f64 {
    traj.t
        .iter()
        .zip(&traj.x)
        .rev()
        .find(|(_, x)| !((*x - x_ref).abs() < tolerance))
        .map(|(t, _)| *t)
        .unwrap_or(0.0)
}

/// `scale * Σ|u|`, a money proxy for actuator effort, not physical energy.
pub fn actuation_cost(traj: &Trajectory, scale: f64) -> f64 {
    traj.u.iter().map(|u| u.abs()).sum::<f64>() * scale
}

/// First time two runs sit more than `tolerance` apart in position.
///
/// Compares sample by sample over the shorter of the two trajectories.
pub fn divergence_time(a: &Trajectory, b: &Trajectory, tolerance: f64) -> Option<f64> {
    a.t.iter()
        .zip(a.x.iter().zip(&b.x))
        .find(|(_, (xa, xb))| (*xa - *xb).abs() > tolerance)
        .map(|(t, _)| *t)
}
