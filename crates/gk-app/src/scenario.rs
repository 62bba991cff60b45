//! The three investigation stages and their plant presets.

use gk_sim::{CartPlant, SimulationParameters};
use serde::{Deserialize, Serialize};

use crate::config::GatekeeperConfig;

/// Nominal model the controller was tuned on.
pub const TWIN_PLANT: CartPlant = CartPlant {
    mass: 2.0,
    friction: 1.0,
};

/// The cart as actually built: heavier, on a slippery floor.
pub const TRUE_PLANT: CartPlant = CartPlant {
    mass: 2.5,
    friction: 0.2,
};

/// Nominal plant with +20 % mass and -30 % friction.
pub const WORST_CASE_PLANT: CartPlant = CartPlant {
    mass: 2.0 * 1.2,
    friction: 0.5 * 0.7,
};

/// Closed interval of gains a learner may dial in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainRange {
    pub min: f64,
    pub max: f64,
}

impl GainRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// `count` evenly spaced values from `min` to `max` inclusive.
    pub fn steps(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let span = self.max - self.min;
                (0..count)
                    .map(|i| self.min + span * i as f64 / (count - 1) as f64)
                    .collect()
            }
        }
    }
}

pub const KP_RANGE: GainRange = GainRange {
    min: 1.0,
    max: 50.0,
};

pub const KD_RANGE: GainRange = GainRange {
    min: 0.0,
    max: 20.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Stage 1: replay the accident, twin vs real cart with the shipped gains.
    AccidentAnalysis,
    /// Stage 2: tune the real cart and watch the kinetic energy.
    FeelTheEnergy,
    /// Stage 3: defend a tuning on the worst-case plant.
    GatekeeperDecision,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::AccidentAnalysis,
        Scenario::FeelTheEnergy,
        Scenario::GatekeeperDecision,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AccidentAnalysis => "1. Scene: Accident Analysis",
            Self::FeelTheEnergy => "2. Engineering Intuition: Feel the Energy",
            Self::GatekeeperDecision => "3. Gatekeeper: Decision Meeting",
        }
    }

    /// Plant the stage evaluates the learner's gains on.
    pub fn plant(&self) -> CartPlant {
        match self {
            Self::AccidentAnalysis | Self::FeelTheEnergy => TRUE_PLANT,
            Self::GatekeeperDecision => WORST_CASE_PLANT,
        }
    }

    /// Starting `(kp, kd)`.
    pub fn default_gains(&self) -> (f64, f64) {
        match self {
            Self::AccidentAnalysis => (15.0, 2.0),
            Self::FeelTheEnergy => (20.0, 2.0),
            Self::GatekeeperDecision => (25.0, 8.0),
        }
    }

    /// Whether the learner may change the gains in this stage.
    pub fn tunable(&self) -> bool {
        !matches!(self, Self::AccidentAnalysis)
    }

    pub fn parameters(&self, kp: f64, kd: f64, config: &GatekeeperConfig) -> SimulationParameters {
        SimulationParameters::for_plant(self.plant(), kp, kd, config.x_ref)
    }

    pub fn default_parameters(&self, config: &GatekeeperConfig) -> SimulationParameters {
        let (kp, kd) = self.default_gains();
        self.parameters(kp, kd, config)
    }
}

/// Log a warning when gains fall outside the learner's slider ranges.
///
/// Returns true when both are in range. Out-of-range gains still simulate.
pub(crate) fn check_gain_ranges(kp: f64, kd: f64) -> bool {
    let ok = KP_RANGE.contains(kp) && KD_RANGE.contains(kd);
    if !ok {
        tracing::warn!(kp, kd, "gains outside the teaching ranges");
    }
    ok
}
