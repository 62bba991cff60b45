//! Simulation output.

use gk_core::max_of;
use serde::{Deserialize, Serialize};

/// Five aligned, uniformly sampled series produced by one run.
///
/// `u` holds the command applied *during* the step that starts at each sample,
/// so its last entry is never written and stays zero. `energy` is evaluated at
/// the state reached *after* each step, so its first entry stays zero whatever
/// the initial velocity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Time (s)
    pub t: Vec<f64>,
    /// Position (m)
    pub x: Vec<f64>,
    /// Velocity (m/s)
    pub v: Vec<f64>,
    /// Saturated actuator force (N)
    pub u: Vec<f64>,
    /// Kinetic energy (J)
    pub energy: Vec<f64>,
}

/// One row of a [`Trajectory`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    pub x: f64,
    pub v: f64,
    pub u: f64,
    pub energy: f64,
}

impl Trajectory {
    /// `n` zeroed samples on the grid `t[k] = k·dt`.
    pub(crate) fn zeroed(n: usize, dt: f64) -> Self {
        Self {
            t: (0..n).map(|k| k as f64 * dt).collect(),
            x: vec![0.0; n],
            v: vec![0.0; n],
            u: vec![0.0; n],
            energy: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// True when every series has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.t.len();
        self.x.len() == n && self.v.len() == n && self.u.len() == n && self.energy.len() == n
    }

    /// Sample spacing, if there are at least two samples.
    pub fn time_step(&self) -> Option<f64> {
        match self.t.as_slice() {
            [t0, t1, ..] => Some(t1 - t0),
            _ => None,
        }
    }

    pub fn sample(&self, k: usize) -> Option<Sample> {
        Some(Sample {
            t: *self.t.get(k)?,
            x: *self.x.get(k)?,
            v: *self.v.get(k)?,
            u: *self.u.get(k)?,
            energy: *self.energy.get(k)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).map_while(|k| self.sample(k))
    }

    /// Farthest position reached.
    pub fn max_position(&self) -> Option<f64> {
        max_of(&self.x)
    }

    /// Largest kinetic energy reached.
    pub fn peak_energy(&self) -> Option<f64> {
        max_of(&self.energy)
    }

    pub fn final_position(&self) -> Option<f64> {
        self.x.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_grid() {
        let traj = Trajectory::zeroed(4, 0.25);
        assert_eq!(traj.t, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(traj.is_aligned());
        assert_eq!(traj.time_step(), Some(0.25));
        assert_eq!(traj.samples().count(), 4);
    }

    #[test]
    fn empty_trajectory_has_no_extremes() {
        let traj = Trajectory::zeroed(0, 0.1);
        assert!(traj.is_empty());
        assert_eq!(traj.max_position(), None);
        assert_eq!(traj.peak_energy(), None);
        assert_eq!(traj.final_position(), None);
        assert_eq!(traj.time_step(), None);
    }

    #[test]
    fn samples_stop_at_shortest_series() {
        let mut traj = Trajectory::zeroed(3, 0.1);
        traj.u.pop();
        assert!(!traj.is_aligned());
        assert_eq!(traj.samples().count(), 2);
    }
}
