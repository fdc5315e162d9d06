//! Correction plan error types

use thiserror::Error;

/// Errors that reject a bicarbonate correction request before any math runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A request or options field is NaN or infinite
    #[error("Field is not a finite number: {field}")]
    NotFinite { field: &'static str },

    /// Weight-based deficit math needs a positive weight
    #[error("Patient weight must be positive, got {weight_kg} kg")]
    NonPositiveWeight { weight_kg: f64 },

    /// A correction only exists when the target exceeds the current level
    #[error("Target HCO3 ({target} mEq/L) must be above current ({current} mEq/L)")]
    TargetNotAboveCurrent { target: f64, current: f64 },

    /// Volumes, durations, and the stock concentration all scale the plan
    /// and must be positive
    #[error("Plan option {field} must be positive, got {value}")]
    NonPositiveOption { field: &'static str, value: f64 },

    /// The deficit split must leave both phases a non-negative share
    #[error("Loading fraction must be between 0 and 1, got {fraction}")]
    LoadingFractionOutOfRange { fraction: f64 },
}
