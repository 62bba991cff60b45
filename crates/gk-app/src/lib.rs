//! Presentation-side service layer for the gatekeeper teaching tool.
//!
//! Front ends (the CLI today) call into this crate to run the three
//! investigation stages, derive performance metrics from trajectories and
//! turn them into the gatekeeper's decision.

pub mod config;
pub mod decision;
pub mod error;
pub mod export;
pub mod metrics;
pub mod report;
pub mod scenario;
pub mod sweep;

// Re-export key types for convenience
pub use config::GatekeeperConfig;
pub use decision::{
    CostRating, DecisionPanel, EnergyLesson, SafetyRating, SpeedRating, Verdict, classify,
};
pub use error::{AppError, AppResult};
pub use export::{write_csv, write_json};
pub use metrics::{PerformanceMetrics, actuation_cost, divergence_time, safety_margin, settling_time};
pub use report::{
    AccidentReport, EnergyReport, GatekeeperReport, accident_report, energy_report,
    gatekeeper_report,
};
pub use scenario::{GainRange, KD_RANGE, KP_RANGE, Scenario};
pub use sweep::{SweepCell, sweep_gains};
