//! Error types for simulation requests.

use thiserror::Error;

/// Errors raised before a simulation starts.
///
/// Once inputs pass validation the integration loop itself cannot fail;
/// numerical blow-up from aggressive gains is reported in the trajectory, not here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error(
        "Insufficient samples: t_max={t_max} / dt={dt} yields {samples} sample(s), at least {min} required",
        min = crate::params::MIN_SAMPLES
    )]
    InsufficientSamples { samples: usize, t_max: f64, dt: f64 },

    #[error("Controller error: {0}")]
    Control(#[from] gk_controls::ControlError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<gk_core::CoreError> for SimError {
    fn from(e: gk_core::CoreError) -> Self {
        match e {
            gk_core::CoreError::NonFinite { what, .. } => SimError::Domain { what },
            gk_core::CoreError::InvalidArg { what } => SimError::Domain { what },
        }
    }
}
