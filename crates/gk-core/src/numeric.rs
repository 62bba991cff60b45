use crate::CoreError;

/// Floating point type used throughout the simulator
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Largest element of a slice, NaN-propagating like a plain reduction would be.
///
/// Returns `None` for an empty slice.
pub fn max_of(values: &[Real]) -> Option<Real> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold(*first, |acc, &v| {
        if acc.is_nan() || v.is_nan() {
            Real::NAN
        } else {
            acc.max(v)
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_finite_passes_value_through() {
        assert_eq!(ensure_finite(2.5, "mass").unwrap(), 2.5);
        assert!(ensure_finite(Real::INFINITY, "mass").is_err());
    }

    #[test]
    fn max_of_handles_empty_and_nan() {
        assert_eq!(max_of(&[]), None);
        assert_eq!(max_of(&[0.2, 1.4, -3.0]), Some(1.4));
        assert!(max_of(&[0.2, Real::NAN, 1.0]).unwrap().is_nan());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn max_of_bounds_every_element(values in prop::collection::vec(-1e6_f64..1e6_f64, 1..64)) {
            let max = max_of(&values).unwrap();
            prop_assert!(values.iter().all(|&v| v <= max));
            prop_assert!(values.contains(&max));
        }

        #[test]
        fn nearly_equal_is_symmetric(a in -1e3_f64..1e3_f64, b in -1e3_f64..1e3_f64) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }
    }
}
