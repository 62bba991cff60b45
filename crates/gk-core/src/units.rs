// gk-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, Force as UomForce, Length as UomLength, Mass as UomMass,
    MassRate as UomMassRate, Time as UomTime, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
/// Viscous friction coefficient: N·s/m reduces to kg/s.
pub type MassRate = UomMassRate;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn joule(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn newton(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _m = kg(2.5);
        let _c = kgps(0.2);
        let _x = m(1.5);
        let _v = mps(0.3);
        let _dt = s(0.01);
        let _e = joule(5.0);
        let _u = newton(50.0);
    }

    #[test]
    fn friction_coefficient_keeps_si_value() {
        use uom::si::mass_rate::kilogram_per_second;
        assert_eq!(kgps(0.35).get::<kilogram_per_second>(), 0.35);
    }

    #[test]
    fn time_step_keeps_si_value() {
        use uom::si::time::second;
        assert_eq!(s(0.01).get::<second>(), 0.01);
    }
}
