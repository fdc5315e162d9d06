//! Sodium bicarbonate deficit correction planning
//!
//! This module turns a patient weight and a serum bicarbonate gap into a
//! two-phase infusion schedule for 8.4% sodium bicarbonate (SBC) stock at
//! 595 mmol/L in 10 mL ampules.
//!
//! # Computation
//!
//! | Step | Formula |
//! |------|---------|
//! | Deficit | 0.5 × weight × (target − current) mEq |
//! | Stock volume | deficit / 595 × 1000 mL |
//! | Ampules | stock volume / 10 |
//! | Loading phase | half the stock over 4 h |
//! | Maintenance phase | half the stock over 20 h |
//! | Drip rate | mL/hr × drop factor / 60 drops/min |
//!
//! Each plan carries three administration variants of the same split:
//! undiluted stock on a pump, stock diluted into a 500 mL D5 bag, and a
//! two-bag form where D5 tops the stock up to 500 mL per phase. All
//! constants are defaults on [`PlanOptions`].
//!
//! # Usage
//!
//! ```rust
//! use infusol::bicarb::{CorrectionRequest, DropFactor};
//!
//! let plan = CorrectionRequest::new(60.0, 24.0)
//!     .with_current_hco3(18.0)
//!     .with_drop_factor(DropFactor::MACRO_16)
//!     .plan()
//!     .unwrap();
//!
//! assert_eq!(plan.deficit_meq, 180.0);
//! assert!((plan.two_bag.loading.rate_ml_hr - 125.0).abs() < 1e-9);
//! println!("{}", plan);
//! ```
//!
//! A request with a non-positive weight or a target at or below the current
//! level is rejected with a [`PlanError`] before any math runs, as are
//! options with a non-positive volume, duration, or stock concentration.
//! Callers holding raw form numbers can skip the builder via
//! [`plan_correction`], which returns the crate-level
//! [`crate::InfusolError`].

// Internal modules
mod error;
mod plan;
mod types;

// Public API
pub use error::PlanError;
pub use plan::{plan_correction, CorrectionRequest};
pub use types::{
    CorrectionPlan, DropFactor, Phase, PhaseKind, PlanOptions, PlanWarning, Schedule,
};
