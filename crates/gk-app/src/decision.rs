//! Gatekeeper decision panel.
//!
//! Each metric gets its own rating; the overall verdict only looks at safety
//! margin and settling time. Cost is shown to the engineer but never blocks
//! or grants approval.

use serde::{Deserialize, Serialize};

use crate::config::GatekeeperConfig;
use crate::metrics::PerformanceMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyRating {
    Perfect,
    Risky,
    Accident,
}

impl SafetyRating {
    pub fn assess(margin: f64, config: &GatekeeperConfig) -> Self {
        if margin > config.margin_safe {
            Self::Perfect
        } else if margin > 0.0 {
            Self::Risky
        } else {
            Self::Accident
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Risky => "Risky",
            Self::Accident => "ACCIDENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedRating {
    Fast,
    Medium,
    Slow,
}

impl SpeedRating {
    pub fn assess(settling_time_s: f64, config: &GatekeeperConfig) -> Self {
        if settling_time_s < config.settle_fast_s {
            Self::Fast
        } else if settling_time_s < config.settle_slow_s {
            Self::Medium
        } else {
            Self::Slow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Medium => "Medium",
            Self::Slow => "Slow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostRating {
    Cheap,
    Expensive,
}

impl CostRating {
    pub fn assess(cost: f64, config: &GatekeeperConfig) -> Self {
        if cost < config.cost_budget {
            Self::Cheap
        } else {
            Self::Expensive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cheap => "Cheap",
            Self::Expensive => "Expensive",
        }
    }
}

/// Outcome of the commissioning meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The cart hit the wall.
    Rejected,
    /// Very safe but slow: fit for fragile handling, not for fast lines.
    ConditionalApproval,
    /// Safe enough and fast: fit for high-speed logistics.
    FullApproval,
    /// Works, but stands out neither in speed nor in safety.
    Review,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rejected => "REJECTED",
            Self::ConditionalApproval => "CONDITIONAL APPROVAL",
            Self::FullApproval => "FULL APPROVAL",
            Self::Review => "REVIEW",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::Rejected => "Safety breach. Discussion closed.",
            Self::ConditionalApproval => {
                "Suitable for fragile glass handling, too slow for the fast packaging line."
            }
            Self::FullApproval => {
                "Suitable for high-speed logistics; the speed justifies the energy bill."
            }
            Self::Review => "The design works but does not stand out in speed or safety.",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::ConditionalApproval | Self::FullApproval)
    }
}

/// Final decision; the first matching branch wins.
///
/// `_cost` is part of the panel's inputs but never changes the verdict.
pub fn classify(
    margin: f64,
    settling_time_s: f64,
    _cost: f64,
    config: &GatekeeperConfig,
) -> Verdict {
    if margin <= 0.0 {
        Verdict::Rejected
    } else if margin > config.margin_safe && settling_time_s > config.settle_slow_s {
        Verdict::ConditionalApproval
    } else if margin > config.margin_approval && settling_time_s < config.settle_fast_s {
        Verdict::FullApproval
    } else {
        Verdict::Review
    }
}

/// Everything the gatekeeper shows for one design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionPanel {
    pub metrics: PerformanceMetrics,
    pub safety: SafetyRating,
    pub speed: SpeedRating,
    pub cost: CostRating,
    pub verdict: Verdict,
}

impl DecisionPanel {
    pub fn evaluate(metrics: PerformanceMetrics, config: &GatekeeperConfig) -> Self {
        Self {
            metrics,
            safety: SafetyRating::assess(metrics.safety_margin, config),
            speed: SpeedRating::assess(metrics.settling_time_s, config),
            cost: CostRating::assess(metrics.actuation_cost, config),
            verdict: classify(
                metrics.safety_margin,
                metrics.settling_time_s,
                metrics.actuation_cost,
                config,
            ),
        }
    }
}

/// What the energy plot says about the chosen gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyLesson {
    /// Too much kinetic energy and too little braking to shed it.
    HighEnergy,
    /// Derivative action is soaking up momentum quickly.
    StrongBraking,
    /// Kp loads energy, Kd absorbs it; keep looking for the balance.
    Balance,
}

impl EnergyLesson {
    pub fn assess(peak_energy_j: f64, kd: f64, config: &GatekeeperConfig) -> Self {
        if peak_energy_j > config.energy_alarm_j && kd < config.brake_weak_kd {
            Self::HighEnergy
        } else if kd > config.brake_strong_kd {
            Self::StrongBraking
        } else {
            Self::Balance
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::HighEnergy => {
                "High energy: the brake (Kd) cannot dissipate it, a wall collision is inevitable."
            }
            Self::StrongBraking => "Strong braking: high Kd is swallowing the momentum.",
            Self::Balance => "Kp is the gas pedal and loads energy, Kd is the brake. Find the balance.",
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn metrics(margin: f64, settle: f64, cost: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            safety_margin: margin,
            settling_time_s: settle,
            actuation_cost: cost,
            peak_energy_j: 0.0,
        }
    }

    proptest! {
        #[test]
        fn collisions_are_never_approved(
            margin in -2.0_f64..=0.0,
            settle in 0.0_f64..5.0,
            cost in 0.0_f64..500.0,
        ) {
            let config = GatekeeperConfig::default();
            let panel = DecisionPanel::evaluate(metrics(margin, settle, cost), &config);
            prop_assert_eq!(panel.verdict, Verdict::Rejected);
            prop_assert_eq!(panel.safety, SafetyRating::Accident);
        }

        #[test]
        fn full_approval_implies_fast(
            margin in -1.0_f64..1.0,
            settle in 0.0_f64..5.0,
            cost in 0.0_f64..500.0,
        ) {
            let config = GatekeeperConfig::default();
            let panel = DecisionPanel::evaluate(metrics(margin, settle, cost), &config);
            if panel.verdict == Verdict::FullApproval {
                prop_assert_eq!(panel.speed, SpeedRating::Fast);
                prop_assert_ne!(panel.safety, SafetyRating::Accident);
            }
            if panel.verdict == Verdict::ConditionalApproval {
                prop_assert_eq!(panel.safety, SafetyRating::Perfect);
                prop_assert_eq!(panel.speed, SpeedRating::Slow);
            }
        }
    }
}
