//! Cart plant and its closed-loop transient model.

use gk_controls::PdController;
use gk_core::ensure_finite;
use gk_core::units::{Mass, MassRate};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;

/// Point mass on a rail with linear viscous friction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartPlant {
    /// Mass (kg), strictly positive.
    pub mass: f64,
    /// Viscous friction coefficient (N·s/m), non-negative.
    pub friction: f64,
}

impl CartPlant {
    pub fn new(mass: f64, friction: f64) -> SimResult<Self> {
        ensure_finite(mass, "mass must be finite")?;
        ensure_finite(friction, "friction must be finite")?;
        if mass <= 0.0 {
            return Err(SimError::Domain {
                what: "mass must be positive",
            });
        }
        if friction < 0.0 {
            return Err(SimError::Domain {
                what: "friction must be non-negative",
            });
        }
        Ok(Self { mass, friction })
    }

    /// Build from SI quantities.
    pub fn from_quantities(mass: Mass, friction: MassRate) -> SimResult<Self> {
        use uom::si::mass::kilogram;
        use uom::si::mass_rate::kilogram_per_second;
        Self::new(
            mass.get::<kilogram>(),
            friction.get::<kilogram_per_second>(),
        )
    }

    /// Newton's second law with drag: `a = (-c·v + u) / m`.
    #[inline]
    pub fn acceleration(&self, velocity: f64, force: f64) -> f64 {
        (-self.friction * velocity + force) / self.mass
    }

    /// `0.5·m·v²`
    #[inline]
    pub fn kinetic_energy(&self, velocity: f64) -> f64 {
        0.5 * self.mass * velocity.powi(2)
    }
}

/// Cart position and velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartState {
    pub x: f64,
    pub v: f64,
}

/// Closed loop: plant + PD controller tracking a fixed target.
#[derive(Clone, Debug)]
pub struct CartModel {
    pub plant: CartPlant,
    pub controller: PdController,
    pub x_ref: f64,
    pub initial: CartState,
}

impl CartModel {
    pub fn new(plant: CartPlant, controller: PdController, x_ref: f64, initial: CartState) -> Self {
        Self {
            plant,
            controller,
            x_ref,
            initial,
        }
    }

    /// Saturated actuator force for the given state.
    #[inline]
    pub fn control(&self, state: &CartState) -> f64 {
        self.controller.update(state.x, self.x_ref, state.v)
    }
}

impl TransientModel for CartModel {
    type State = CartState;

    fn initial_state(&self) -> CartState {
        self.initial
    }

    fn rhs(&mut self, _t: f64, state: &CartState) -> SimResult<CartState> {
        let u = self.control(state);
        Ok(CartState {
            x: state.v,
            v: self.plant.acceleration(state.v, u),
        })
    }

    fn add(&self, a: &CartState, b: &CartState) -> CartState {
        CartState {
            x: a.x + b.x,
            v: a.v + b.v,
        }
    }

    fn scale(&self, a: &CartState, scale: f64) -> CartState {
        CartState {
            x: a.x * scale,
            v: a.v * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::units::{kg, kgps};

    #[test]
    fn plant_rejects_bad_mass() {
        assert!(matches!(
            CartPlant::new(0.0, 1.0),
            Err(SimError::Domain { .. })
        ));
        assert!(CartPlant::new(-2.0, 1.0).is_err());
        assert!(CartPlant::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn plant_rejects_negative_friction() {
        assert!(CartPlant::new(2.0, -0.1).is_err());
        assert!(CartPlant::new(2.0, 0.0).is_ok());
    }

    #[test]
    fn from_quantities_matches_raw() {
        let a = CartPlant::from_quantities(kg(2.5), kgps(0.2)).unwrap();
        assert_eq!(a, CartPlant::new(2.5, 0.2).unwrap());
    }

    #[test]
    fn acceleration_and_energy() {
        let plant = CartPlant::new(2.0, 1.0).unwrap();
        // (-1*2 + 10) / 2
        assert_eq!(plant.acceleration(2.0, 10.0), 4.0);
        assert_eq!(plant.kinetic_energy(3.0), 9.0);
    }

    #[test]
    fn rhs_is_velocity_and_acceleration() {
        let plant = CartPlant::new(2.0, 1.0).unwrap();
        let controller = PdController::new(15.0, 2.0).unwrap();
        let mut model = CartModel::new(plant, controller, 1.0, CartState::default());
        let state = CartState { x: 0.5, v: 0.25 };
        let d = model.rhs(0.0, &state).unwrap();
        let u = 15.0 * 0.5 - 2.0 * 0.25;
        assert_eq!(d.x, 0.25);
        assert_eq!(d.v, (-1.0 * 0.25 + u) / 2.0);
    }
}
