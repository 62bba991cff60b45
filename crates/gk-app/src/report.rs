//! Per-stage reports.

use gk_sim::{SimResult, Trajectory, simulate, simulate_batch};
use serde::{Deserialize, Serialize};

use crate::config::GatekeeperConfig;
use crate::decision::{DecisionPanel, EnergyLesson};
use crate::error::{AppError, AppResult};
use crate::metrics::{PerformanceMetrics, divergence_time};
use crate::scenario::{Scenario, TWIN_PLANT, check_gain_ranges};

/// Stage 1: what the digital twin predicted against what the cart did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccidentReport {
    pub twin: PerformanceMetrics,
    pub actual: PerformanceMetrics,
    /// First time the two positions differ by more than the divergence tolerance
    pub divergence_time_s: Option<f64>,
    #[serde(skip)]
    pub twin_trajectory: Option<Trajectory>,
    #[serde(skip)]
    pub actual_trajectory: Option<Trajectory>,
}

impl AccidentReport {
    /// The twin stayed clear of the wall but the real cart did not.
    pub fn model_mismatch_caused_crash(&self) -> bool {
        !self.twin.collided() && self.actual.collided()
    }
}

pub fn accident_report(config: &GatekeeperConfig) -> AppResult<AccidentReport> {
    let scenario = Scenario::AccidentAnalysis;
    let (kp, kd) = scenario.default_gains();
    let actual_params = scenario.parameters(kp, kd, config);
    let twin_params = gk_sim::SimulationParameters {
        mass: TWIN_PLANT.mass,
        friction: TWIN_PLANT.friction,
        ..actual_params
    };

    let runs = simulate_batch(&[twin_params, actual_params]);
    let [twin, actual]: [SimResult<Trajectory>; 2] = runs
        .try_into()
        .map_err(|_| AppError::InvalidInput("expected two accident runs".into()))?;
    let (twin, actual) = (twin?, actual?);

    let report = AccidentReport {
        twin: PerformanceMetrics::compute(&twin, config)?,
        actual: PerformanceMetrics::compute(&actual, config)?,
        divergence_time_s: divergence_time(&twin, &actual, config.divergence_tolerance),
        twin_trajectory: Some(twin),
        actual_trajectory: Some(actual),
    };
    tracing::info!(
        twin_margin = report.twin.safety_margin,
        actual_margin = report.actual.safety_margin,
        divergence = ?report.divergence_time_s,
        "accident analysis complete"
    );
    Ok(report)
}

/// Stage 2: energy picture for a learner's gains on the real cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyReport {
    pub kp: f64,
    pub kd: f64,
    pub gains_in_range: bool,
    pub metrics: PerformanceMetrics,
    pub lesson: EnergyLesson,
    #[serde(skip)]
    pub trajectory: Option<Trajectory>,
}

pub fn energy_report(kp: f64, kd: f64, config: &GatekeeperConfig) -> AppResult<EnergyReport> {
    let gains_in_range = check_gain_ranges(kp, kd);
    let traj = simulate(&Scenario::FeelTheEnergy.parameters(kp, kd, config))?;
    let metrics = PerformanceMetrics::compute(&traj, config)?;
    let lesson = EnergyLesson::assess(metrics.peak_energy_j, kd, config);
    tracing::info!(kp, kd, peak_energy = metrics.peak_energy_j, ?lesson, "energy stage");
    Ok(EnergyReport {
        kp,
        kd,
        gains_in_range,
        metrics,
        lesson,
        trajectory: Some(traj),
    })
}

/// Stage 3: the decision panel for a learner's gains on the worst-case plant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatekeeperReport {
    pub kp: f64,
    pub kd: f64,
    pub gains_in_range: bool,
    pub panel: DecisionPanel,
    #[serde(skip)]
    pub trajectory: Option<Trajectory>,
}

pub fn gatekeeper_report(
    kp: f64,
    kd: f64,
    config: &GatekeeperConfig,
) -> AppResult<GatekeeperReport> {
    let gains_in_range = check_gain_ranges(kp, kd);
    let traj = simulate(&Scenario::GatekeeperDecision.parameters(kp, kd, config))?;
    let panel = DecisionPanel::evaluate(PerformanceMetrics::compute(&traj, config)?, config);
    tracing::info!(kp, kd, verdict = ?panel.verdict, "gatekeeper decision");
    Ok(GatekeeperReport {
        kp,
        kd,
        gains_in_range,
        panel,
        trajectory: Some(traj),
    })
}
