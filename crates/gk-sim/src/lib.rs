//! Fixed-step simulation of a PD-controlled cart.
//!
//! Provides:
//! - Cart plant (mass + linear viscous friction) driven by a saturating PD controller
//! - Pluggable `TransientModel` / `Integrator` pair
//! - Forward Euler (default, position advanced with pre-update velocity) and RK4
//! - Full time-stamped trajectories of position, velocity, command and kinetic energy
//! - Parallel batches of independent runs

pub mod error;
pub mod integrator;
pub mod model;
pub mod params;
pub mod plant;
pub mod sim;
pub mod trajectory;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use params::{MAX_SAMPLES, MIN_SAMPLES, SimulationParameters};
pub use plant::{CartModel, CartPlant, CartState};
pub use sim::{IntegratorType, simulate, simulate_batch, simulate_with};
pub use trajectory::{Sample, Trajectory};
