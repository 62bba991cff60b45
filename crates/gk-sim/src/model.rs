//! Continuous-time dynamics that an [`Integrator`](crate::Integrator) can step.

use crate::error::SimResult;

/// A closed-loop system written as `ds/dt = f(t, s)`.
///
/// The integrators only need vector-space operations on the state, so for the
/// cart `add` and `scale` act component-wise on `(x, v)`.
pub trait TransientModel {
    type State: Clone;

    /// State at `t = 0`.
    fn initial_state(&self) -> Self::State;

    /// Time derivative of `state`; for the cart this is `(v, a)`.
    fn rhs(&mut self, t: f64, state: &Self::State) -> SimResult<Self::State>;

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    fn scale(&self, a: &Self::State, factor: f64) -> Self::State;
}
