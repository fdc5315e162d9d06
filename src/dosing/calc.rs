//! Pure conversion functions between pump rates and doses
//!
//! This module contains stateless functions that convert a pump rate in mL/hr
//! to a dose and back. All functions take the concentration normalized to
//! mcg/mL and return `None` when the conversion is undefined.

/// Minutes in one hour, the factor between hourly rates and per-minute doses
pub(crate) const MIN_PER_HOUR: f64 = 60.0;

// ============================================================================
// Rate to Dose
// ============================================================================

/// Weight-based dose (mcg/kg/min) delivered at a pump rate
///
/// dose = rate × concentration / (weight × 60)
///
/// Returns `None` unless the weight is positive and all inputs are finite
/// with a non-negative concentration.
#[inline]
pub fn rate_to_dose_per_kg(rate_ml_hr: f64, conc_mcg_per_ml: f64, weight_kg: f64) -> Option<f64> {
    if !rate_ml_hr.is_finite() || !conc_mcg_per_ml.is_finite() || conc_mcg_per_ml < 0.0 {
        return None;
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return None;
    }
    Some(rate_ml_hr * conc_mcg_per_ml / (weight_kg * MIN_PER_HOUR))
}

/// Per-minute dose (mcg/min) delivered at a pump rate
///
/// dose = rate × concentration / 60
#[inline]
pub fn rate_to_dose_per_min(rate_ml_hr: f64, conc_mcg_per_ml: f64) -> Option<f64> {
    if !rate_ml_hr.is_finite() || !conc_mcg_per_ml.is_finite() || conc_mcg_per_ml < 0.0 {
        return None;
    }
    Some(rate_ml_hr * conc_mcg_per_ml / MIN_PER_HOUR)
}

/// Hourly dose (mcg/hr) delivered at a pump rate
///
/// dose = rate × concentration
#[inline]
pub fn rate_to_dose_per_hour(rate_ml_hr: f64, conc_mcg_per_ml: f64) -> Option<f64> {
    if !rate_ml_hr.is_finite() || !conc_mcg_per_ml.is_finite() || conc_mcg_per_ml < 0.0 {
        return None;
    }
    Some(rate_ml_hr * conc_mcg_per_ml)
}

// ============================================================================
// Dose to Rate
// ============================================================================

/// Pump rate (mL/hr) that delivers a weight-based dose (mcg/kg/min)
///
/// rate = dose × weight × 60 / concentration
///
/// Returns `None` unless the concentration and weight are positive and all
/// inputs are finite. A zero concentration has no rate that delivers a
/// nonzero dose, so the inversion is undefined rather than zero.
#[inline]
pub fn dose_per_kg_to_rate(
    dose_mcg_kg_min: f64,
    conc_mcg_per_ml: f64,
    weight_kg: f64,
) -> Option<f64> {
    if !dose_mcg_kg_min.is_finite() || !conc_mcg_per_ml.is_finite() || conc_mcg_per_ml <= 0.0 {
        return None;
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return None;
    }
    Some(dose_mcg_kg_min * weight_kg * MIN_PER_HOUR / conc_mcg_per_ml)
}

/// Pump rate (mL/hr) that delivers a per-minute dose (mcg/min)
///
/// rate = dose × 60 / concentration
#[inline]
pub fn dose_per_min_to_rate(dose_mcg_min: f64, conc_mcg_per_ml: f64) -> Option<f64> {
    if !dose_mcg_min.is_finite() || !conc_mcg_per_ml.is_finite() || conc_mcg_per_ml <= 0.0 {
        return None;
    }
    Some(dose_mcg_min * MIN_PER_HOUR / conc_mcg_per_ml)
}

/// Pump rate (mL/hr) that delivers an hourly dose (mcg/hr)
///
/// rate = dose / concentration
#[inline]
pub fn dose_per_hour_to_rate(dose_mcg_hr: f64, conc_mcg_per_ml: f64) -> Option<f64> {
    if !dose_mcg_hr.is_finite() || !conc_mcg_per_ml.is_finite() || conc_mcg_per_ml <= 0.0 {
        return None;
    }
    Some(dose_mcg_hr / conc_mcg_per_ml)
}
