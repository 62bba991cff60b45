//! Control law primitives for the gatekeeper cart.
//!
//! The cart is driven by a proportional-derivative controller whose command
//! passes through a saturating actuator before it reaches the plant.
//!
//! # Architecture
//!
//! - [`PdController`] turns tracking error and measured rate into a force command
//! - [`ActuatorLimit`] clamps that command to what the motor can physically deliver
//! - The saturation bound is the hard constant [`ACTUATOR_LIMIT_N`]; it is not a tuning knob
//!
//! Saturation is silent: a clamped command is a normal outcome, never an error.

pub mod actuator;
pub mod controller;
pub mod error;

pub use actuator::{ACTUATOR_LIMIT_N, ActuatorLimit};
pub use controller::PdController;
pub use error::{ControlError, ControlResult};
