use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{MassUnit, Patient};
use crate::dosing::{self, Dose, DoseUnit};

/// A prepared infusion solution
///
/// Describes how a syringe or bag was mixed: the drug amount drawn up, the
/// volume it came in, and the diluent added. Concentration is always derived
/// from these fields rather than stored, so edits can never leave a stale
/// value behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    drug_amount: f64,
    unit: MassUnit,
    drug_volume_ml: f64,
    diluent_volume_ml: f64,
}

impl Solution {
    /// Create a solution from its preparation recipe
    ///
    /// `drug_amount` is expressed in `unit`; both volumes are in mL.
    pub fn new(
        drug_amount: f64,
        unit: MassUnit,
        drug_volume_ml: f64,
        diluent_volume_ml: f64,
    ) -> Self {
        Solution {
            drug_amount,
            unit,
            drug_volume_ml,
            diluent_volume_ml,
        }
    }

    /// Drug amount in the solution, in [`Self::mass_unit`]
    pub fn drug_amount(&self) -> f64 {
        self.drug_amount
    }

    /// Mass unit the drug amount is labelled in
    pub fn mass_unit(&self) -> MassUnit {
        self.unit
    }

    /// Volume the drug itself came in (mL)
    pub fn drug_volume_ml(&self) -> f64 {
        self.drug_volume_ml
    }

    /// Diluent volume added to the preparation (mL)
    pub fn diluent_volume_ml(&self) -> f64 {
        self.diluent_volume_ml
    }

    /// Replace the drug amount, keeping the rest of the recipe
    pub fn set_drug_amount(&mut self, drug_amount: f64) {
        self.drug_amount = drug_amount;
    }

    /// Replace the drug volume (mL)
    pub fn set_drug_volume_ml(&mut self, drug_volume_ml: f64) {
        self.drug_volume_ml = drug_volume_ml;
    }

    /// Replace the diluent volume (mL)
    pub fn set_diluent_volume_ml(&mut self, diluent_volume_ml: f64) {
        self.diluent_volume_ml = diluent_volume_ml;
    }

    /// Total prepared volume: drug volume plus diluent (mL)
    pub fn total_volume(&self) -> f64 {
        self.drug_volume_ml + self.diluent_volume_ml
    }

    /// Derive the concentration of this solution
    ///
    /// Returns `None` while the recipe is not yet computable: a total
    /// volume of zero or less, a negative drug amount, or any non-finite
    /// field. `None` is distinct from a genuine zero concentration, which
    /// only arises from a zero drug amount in a positive volume.
    pub fn concentration(&self) -> Option<Concentration> {
        let total = self.total_volume();
        if !total.is_finite() || !self.drug_amount.is_finite() {
            return None;
        }
        if total <= 0.0 || self.drug_amount < 0.0 {
            return None;
        }
        Some(Concentration::new(self.drug_amount / total, self.unit))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} in {:.2} mL + {:.2} mL diluent",
            self.drug_amount, self.unit, self.drug_volume_ml, self.diluent_volume_ml
        )
    }
}

/// A derived solution concentration
///
/// The value is in mass units per mL, with the mass unit carried alongside
/// so the microgram scale is always recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    value: f64,
    unit: MassUnit,
}

impl Concentration {
    pub(crate) fn new(value: f64, unit: MassUnit) -> Self {
        Concentration { value, unit }
    }

    /// Concentration value in [`Self::mass_unit`] per mL
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Mass unit of the numerator
    pub fn mass_unit(&self) -> MassUnit {
        self.unit
    }

    /// Concentration normalized to mcg/mL
    pub fn mcg_per_ml(&self) -> f64 {
        self.value * self.unit.micrograms()
    }

    /// Dose delivered at a pump rate, in the requested unit
    ///
    /// Returns `None` when the dose is not computable: a weight-based unit
    /// with no positive patient weight, or non-finite inputs.
    pub fn dose_at_rate(&self, rate_ml_hr: f64, unit: DoseUnit, patient: &Patient) -> Option<Dose> {
        let conc = self.mcg_per_ml();
        let value = match unit {
            DoseUnit::McgPerKgMin => {
                dosing::rate_to_dose_per_kg(rate_ml_hr, conc, patient.weight_kg())?
            }
            DoseUnit::McgPerMin => dosing::rate_to_dose_per_min(rate_ml_hr, conc)?,
            DoseUnit::McgPerHour => dosing::rate_to_dose_per_hour(rate_ml_hr, conc)?,
        };
        Some(Dose::new(value, unit))
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}/mL", self.value, self.unit)
    }
}
