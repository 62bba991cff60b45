//! Gain sweeps over a plant.

use gk_sim::{CartPlant, SimulationParameters, simulate_batch};
use serde::{Deserialize, Serialize};

use crate::config::GatekeeperConfig;
use crate::decision::DecisionPanel;
use crate::error::AppResult;
use crate::metrics::PerformanceMetrics;

/// One `(kp, kd)` pair and how the gatekeeper rates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCell {
    pub kp: f64,
    pub kd: f64,
    pub panel: DecisionPanel,
}

/// Evaluate every combination of `kp_values` × `kd_values` on `plant`.
///
/// Runs are simulated in parallel. Cells come back kp-major: all kd values for
/// the first kp, then the second kp, and so on.
pub fn sweep_gains(
    plant: CartPlant,
    kp_values: &[f64],
    kd_values: &[f64],
    config: &GatekeeperConfig,
) -> AppResult<Vec<SweepCell>> {
    let params: Vec<SimulationParameters> = kp_values
        .iter()
        .flat_map(|&kp| {
            kd_values
                .iter()
                .map(move |&kd| SimulationParameters::for_plant(plant, kp, kd, config.x_ref))
        })
        .collect();

    tracing::debug!(cells = params.len(), "sweeping gains");

    params
        .iter()
        .zip(simulate_batch(&params))
        .map(|(p, run)| -> AppResult<SweepCell> {
            let metrics = PerformanceMetrics::compute(&run?, config)?;
            Ok(SweepCell {
                kp: p.kp,
                kd: p.kd,
                panel: DecisionPanel::evaluate(metrics, config),
            })
        })
        .collect()
}
