//! Types for dose and rate conversions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Concentration, Patient};
use crate::dosing;

pub use crate::data::drug::DoseUnit;

/// A prescribed or delivered dose
///
/// Pairs a value with its unit so weight-based and absolute doses cannot be
/// confused.
///
/// # Examples
///
/// ```
/// use infusol::dosing::Dose;
/// use infusol::data::{Drug, Patient};
///
/// let conc = Drug::Octreotide.default_solution().concentration().unwrap();
/// let rate = Dose::per_hour(50.0).required_rate(&conc, &Patient::default());
/// assert_eq!(rate, Some(5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    value: f64,
    unit: DoseUnit,
}

impl Dose {
    /// Create a dose with an explicit unit
    pub fn new(value: f64, unit: DoseUnit) -> Self {
        Dose { value, unit }
    }

    /// Weight-based dose in mcg/kg/min
    pub fn per_kg_min(value: f64) -> Self {
        Dose::new(value, DoseUnit::McgPerKgMin)
    }

    /// Absolute dose in mcg/min
    pub fn per_min(value: f64) -> Self {
        Dose::new(value, DoseUnit::McgPerMin)
    }

    /// Hourly dose in mcg/hr
    pub fn per_hour(value: f64) -> Self {
        Dose::new(value, DoseUnit::McgPerHour)
    }

    /// Dose value in [`Self::unit`]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit the dose is expressed in
    pub fn unit(&self) -> DoseUnit {
        self.unit
    }

    /// Pump rate (mL/hr) that delivers this dose from a solution
    ///
    /// Returns `None` when the rate is undefined: a non-positive
    /// concentration, or a weight-based dose with no positive patient
    /// weight.
    pub fn required_rate(&self, conc: &Concentration, patient: &Patient) -> Option<f64> {
        let conc_mcg_ml = conc.mcg_per_ml();
        match self.unit {
            DoseUnit::McgPerKgMin => {
                dosing::dose_per_kg_to_rate(self.value, conc_mcg_ml, patient.weight_kg())
            }
            DoseUnit::McgPerMin => dosing::dose_per_min_to_rate(self.value, conc_mcg_ml),
            DoseUnit::McgPerHour => dosing::dose_per_hour_to_rate(self.value, conc_mcg_ml),
        }
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}
