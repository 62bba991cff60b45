//! Decision thresholds and scenario constants.
//!
//! The defaults are the values the teaching material is written around.
//! A YAML file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatekeeperConfig {
    /// Target position (m)
    pub x_ref: f64,
    /// Wall position (m); reaching it is a collision
    pub wall_position: f64,
    /// Half-width of the arrival band around the target (m)
    pub settle_tolerance: f64,
    /// Currency units per newton-sample of actuator effort
    pub cost_scale: f64,
    /// Margin above which safety is rated perfect (m)
    pub margin_safe: f64,
    /// Margin required for full approval (m)
    pub margin_approval: f64,
    /// Settling time below which the design is fast (s)
    pub settle_fast_s: f64,
    /// Settling time above which the design is slow (s)
    pub settle_slow_s: f64,
    /// Actuation cost below which the design is cheap
    pub cost_budget: f64,
    /// Peak kinetic energy considered dangerous (J)
    pub energy_alarm_j: f64,
    /// Kd below which braking cannot absorb an energy alarm
    pub brake_weak_kd: f64,
    /// Kd above which braking is strong
    pub brake_strong_kd: f64,
    /// Position gap at which two runs count as diverged (m)
    pub divergence_tolerance: f64,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            x_ref: 1.0,
            wall_position: 1.5,
            settle_tolerance: 0.05,
            cost_scale: 0.01,
            margin_safe: 0.2,
            margin_approval: 0.1,
            settle_fast_s: 1.5,
            settle_slow_s: 3.0,
            cost_budget: 50.0,
            energy_alarm_j: 5.0,
            brake_weak_kd: 5.0,
            brake_strong_kd: 10.0,
            divergence_tolerance: 0.05,
        }
    }
}

impl GatekeeperConfig {
    pub fn load_yaml(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded gatekeeper config");
        Ok(config)
    }

    pub fn save_yaml(&self, path: &Path) -> AppResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| AppError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load_yaml(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("x_ref", self.x_ref),
            ("wall_position", self.wall_position),
            ("settle_tolerance", self.settle_tolerance),
            ("cost_scale", self.cost_scale),
            ("margin_safe", self.margin_safe),
            ("margin_approval", self.margin_approval),
            ("settle_fast_s", self.settle_fast_s),
            ("settle_slow_s", self.settle_slow_s),
            ("cost_budget", self.cost_budget),
            ("energy_alarm_j", self.energy_alarm_j),
            ("brake_weak_kd", self.brake_weak_kd),
            ("brake_strong_kd", self.brake_strong_kd),
            ("divergence_tolerance", self.divergence_tolerance),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::Validation(format!(
                "{name} must be finite (got {value})"
            )));
        }
        if self.settle_tolerance <= 0.0 {
            return Err(AppError::Validation(
                "settle_tolerance must be positive".into(),
            ));
        }
        if self.divergence_tolerance <= 0.0 {
            return Err(AppError::Validation(
                "divergence_tolerance must be positive".into(),
            ));
        }
        if self.cost_scale < 0.0 {
            return Err(AppError::Validation(
                "cost_scale must be non-negative".into(),
            ));
        }
        if self.settle_slow_s <= self.settle_fast_s {
            return Err(AppError::Validation(
                "settle_slow_s must exceed settle_fast_s".into(),
            ));
        }
        if self.margin_safe < self.margin_approval {
            return Err(AppError::Validation(
                "margin_safe must be at least margin_approval".into(),
            ));
        }
        Ok(())
    }
}
