//! Correction plan construction from a validated request

use serde::{Deserialize, Serialize};

use crate::error::InfusolError;

use super::error::PlanError;
use super::types::{
    CorrectionPlan, DropFactor, Phase, PhaseKind, PlanOptions, PlanWarning, Schedule,
};

/// Fraction of body weight treated as bicarbonate distribution space
const DEFICIT_SPACE_FACTOR: f64 = 0.5;

/// Starting serum bicarbonate assumed before a measurement is entered (mEq/L)
const DEFAULT_CURRENT_HCO3: f64 = 18.0;

/// A bicarbonate correction request
///
/// Carries the patient weight, the target and current serum bicarbonate, and
/// the giving set in use. [`Self::plan`] validates the request and builds the
/// full two-phase [`CorrectionPlan`].
///
/// # Examples
///
/// ```
/// use infusol::bicarb::CorrectionRequest;
///
/// let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();
/// assert_eq!(plan.deficit_meq, 180.0);
/// assert!((plan.required_ampules - 30.25).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    weight_kg: f64,
    target_hco3: f64,
    current_hco3: f64,
    drop_factor: DropFactor,
}

impl CorrectionRequest {
    /// Create a request for a patient weight (kg) and target HCO3 (mEq/L)
    ///
    /// The current HCO3 starts at 18 mEq/L and the giving set at the default
    /// macrodrip factor until overridden.
    pub fn new(weight_kg: f64, target_hco3: f64) -> Self {
        CorrectionRequest {
            weight_kg,
            target_hco3,
            current_hco3: DEFAULT_CURRENT_HCO3,
            drop_factor: DropFactor::default(),
        }
    }

    /// Set the measured current HCO3 (mEq/L)
    pub fn with_current_hco3(mut self, current_hco3: f64) -> Self {
        self.current_hco3 = current_hco3;
        self
    }

    /// Set the giving set drop factor
    pub fn with_drop_factor(mut self, drop_factor: DropFactor) -> Self {
        self.drop_factor = drop_factor;
        self
    }

    /// Patient weight (kg)
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Target serum HCO3 (mEq/L)
    pub fn target_hco3(&self) -> f64 {
        self.target_hco3
    }

    /// Current serum HCO3 (mEq/L)
    pub fn current_hco3(&self) -> f64 {
        self.current_hco3
    }

    /// Giving set drop factor
    pub fn drop_factor(&self) -> DropFactor {
        self.drop_factor
    }

    /// Build the correction plan with default options
    pub fn plan(&self) -> Result<CorrectionPlan, PlanError> {
        self.plan_with(&PlanOptions::default())
    }

    /// Build the correction plan with explicit options
    ///
    /// Validation is fail-fast: non-finite request fields, then a
    /// non-positive weight, then a target at or below the current level,
    /// then degenerate options. No partial plan is produced on rejection.
    pub fn plan_with(&self, options: &PlanOptions) -> Result<CorrectionPlan, PlanError> {
        if !self.weight_kg.is_finite() {
            return Err(PlanError::NotFinite { field: "weight_kg" });
        }
        if !self.target_hco3.is_finite() {
            return Err(PlanError::NotFinite {
                field: "target_hco3",
            });
        }
        if !self.current_hco3.is_finite() {
            return Err(PlanError::NotFinite {
                field: "current_hco3",
            });
        }
        if self.weight_kg <= 0.0 {
            return Err(PlanError::NonPositiveWeight {
                weight_kg: self.weight_kg,
            });
        }
        if self.target_hco3 <= self.current_hco3 {
            return Err(PlanError::TargetNotAboveCurrent {
                target: self.target_hco3,
                current: self.current_hco3,
            });
        }
        validate_options(options)?;

        let deficit_meq =
            DEFICIT_SPACE_FACTOR * self.weight_kg * (self.target_hco3 - self.current_hco3);
        // mmol and mEq are interchangeable for HCO3-
        let required_sbc_ml = deficit_meq / options.sbc_mmol_per_l * 1000.0;
        let required_ampules = required_sbc_ml / options.ampule_volume_ml;

        let loading_ml = required_sbc_ml * options.loading_fraction;
        let maintenance_ml = required_sbc_ml - loading_ml;

        let mut warnings = Vec::new();

        let undiluted = Schedule {
            loading: undiluted_phase(loading_ml, options.loading_hours),
            maintenance: undiluted_phase(maintenance_ml, options.maintenance_hours),
        };
        let diluted = Schedule {
            loading: diluted_phase(
                loading_ml,
                options.loading_hours,
                options.d5_bag_volume_ml,
                self.drop_factor,
            ),
            maintenance: diluted_phase(
                maintenance_ml,
                options.maintenance_hours,
                options.d5_bag_volume_ml,
                self.drop_factor,
            ),
        };
        let two_bag = Schedule {
            loading: two_bag_phase(
                PhaseKind::Loading,
                loading_ml,
                options.loading_hours,
                options.d5_bag_volume_ml,
                self.drop_factor,
                &mut warnings,
            ),
            maintenance: two_bag_phase(
                PhaseKind::Maintenance,
                maintenance_ml,
                options.maintenance_hours,
                options.d5_bag_volume_ml,
                self.drop_factor,
                &mut warnings,
            ),
        };

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        tracing::debug!(
            "Planned correction: {:.2} mEq deficit, {:.2} mL SBC over {:.0} h",
            deficit_meq,
            required_sbc_ml,
            options.loading_hours + options.maintenance_hours
        );

        Ok(CorrectionPlan {
            deficit_meq,
            required_sbc_ml,
            required_ampules,
            mmol_per_ampule: options.mmol_per_ampule(),
            undiluted,
            diluted,
            two_bag,
            warnings,
        })
    }
}

/// Plan a bicarbonate correction from raw calculator inputs
///
/// One-call form of [`CorrectionRequest`] for callers holding the form
/// numbers directly. Uses the default [`PlanOptions`].
///
/// # Examples
///
/// ```
/// use infusol::bicarb::{plan_correction, DropFactor};
///
/// let plan = plan_correction(70.0, 24.0, 15.0, DropFactor::MACRO_16).unwrap();
/// assert_eq!(plan.deficit_meq, 315.0);
/// ```
pub fn plan_correction(
    weight_kg: f64,
    target_hco3: f64,
    current_hco3: f64,
    drop_factor: DropFactor,
) -> Result<CorrectionPlan, InfusolError> {
    let plan = CorrectionRequest::new(weight_kg, target_hco3)
        .with_current_hco3(current_hco3)
        .with_drop_factor(drop_factor)
        .plan()?;
    Ok(plan)
}

fn validate_options(options: &PlanOptions) -> Result<(), PlanError> {
    let scaling = [
        ("sbc_mmol_per_l", options.sbc_mmol_per_l),
        ("ampule_volume_ml", options.ampule_volume_ml),
        ("loading_hours", options.loading_hours),
        ("maintenance_hours", options.maintenance_hours),
        ("d5_bag_volume_ml", options.d5_bag_volume_ml),
    ];
    for (field, value) in scaling {
        if !value.is_finite() {
            return Err(PlanError::NotFinite { field });
        }
        if value <= 0.0 {
            return Err(PlanError::NonPositiveOption { field, value });
        }
    }
    if !options.loading_fraction.is_finite() {
        return Err(PlanError::NotFinite {
            field: "loading_fraction",
        });
    }
    if !(0.0..=1.0).contains(&options.loading_fraction) {
        return Err(PlanError::LoadingFractionOutOfRange {
            fraction: options.loading_fraction,
        });
    }
    Ok(())
}

fn undiluted_phase(sbc_volume_ml: f64, duration_hr: f64) -> Phase {
    Phase {
        sbc_volume_ml,
        d5_volume_ml: 0.0,
        total_volume_ml: sbc_volume_ml,
        duration_hr,
        rate_ml_hr: sbc_volume_ml / duration_hr,
        drops_per_min: None,
    }
}

fn diluted_phase(
    sbc_volume_ml: f64,
    duration_hr: f64,
    bag_volume_ml: f64,
    drop_factor: DropFactor,
) -> Phase {
    let total_volume_ml = sbc_volume_ml + bag_volume_ml;
    let rate_ml_hr = total_volume_ml / duration_hr;
    Phase {
        sbc_volume_ml,
        d5_volume_ml: bag_volume_ml,
        total_volume_ml,
        duration_hr,
        rate_ml_hr,
        drops_per_min: Some(drop_factor.drops_per_min(rate_ml_hr)),
    }
}

fn two_bag_phase(
    kind: PhaseKind,
    sbc_volume_ml: f64,
    duration_hr: f64,
    bag_volume_ml: f64,
    drop_factor: DropFactor,
    warnings: &mut Vec<PlanWarning>,
) -> Phase {
    // D5 tops the bag up to its nominal volume; the bag never stretches
    let d5_volume_ml = (bag_volume_ml - sbc_volume_ml).max(0.0);
    let total_volume_ml = (sbc_volume_ml + d5_volume_ml).min(bag_volume_ml);
    if sbc_volume_ml >= bag_volume_ml {
        warnings.push(PlanWarning::BagOverflow {
            phase: kind,
            sbc_volume_ml,
            bag_volume_ml,
        });
    }
    let rate_ml_hr = total_volume_ml / duration_hr;
    Phase {
        sbc_volume_ml,
        d5_volume_ml,
        total_volume_ml,
        duration_hr,
        rate_ml_hr,
        drops_per_min: Some(drop_factor.drops_per_min(rate_ml_hr)),
    }
}
