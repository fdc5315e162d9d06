use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Solution;
use crate::dosing::Dose;

/// Mass unit in which a drug amount is prescribed and labelled
///
/// The unit carries the scale used to express a concentration in mcg/mL,
/// so conversion formulas never hard-code a mg→mcg factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    /// Milligrams (vasopressors and inotropes are labelled in mg)
    Milligram,
    /// Micrograms (octreotide ampules are labelled in mcg)
    Microgram,
}

impl MassUnit {
    /// Micrograms per one unit of this mass
    pub fn micrograms(&self) -> f64 {
        match self {
            MassUnit::Milligram => 1000.0,
            MassUnit::Microgram => 1.0,
        }
    }

    /// Unit symbol as printed on labels
    pub fn symbol(&self) -> &'static str {
        match self {
            MassUnit::Milligram => "mg",
            MassUnit::Microgram => "mcg",
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unit in which a dose is prescribed
///
/// Weight-based dosing normalizes by patient weight; the other two forms
/// express total drug delivered per minute or per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoseUnit {
    /// Micrograms per kilogram of body weight per minute
    McgPerKgMin,
    /// Micrograms per minute
    McgPerMin,
    /// Micrograms per hour
    McgPerHour,
}

impl DoseUnit {
    /// Whether doses in this unit are normalized by patient weight
    pub fn is_weight_based(&self) -> bool {
        matches!(self, DoseUnit::McgPerKgMin)
    }

    /// Unit symbol as displayed next to a dose
    pub fn symbol(&self) -> &'static str {
        match self {
            DoseUnit::McgPerKgMin => "mcg/kg/min",
            DoseUnit::McgPerMin => "mcg/min",
            DoseUnit::McgPerHour => "mcg/hr",
        }
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A drug in the infusion catalog
///
/// Each entry fixes the mass unit its amounts are labelled in, the dose
/// units it is prescribed in, a default solution preparation, and the
/// clinical dose bands used to sanity-check a prescription.
///
/// # Examples
///
/// ```
/// use infusol::data::Drug;
///
/// let solution = Drug::Dopamine.default_solution();
/// let concentration = solution.concentration().unwrap();
/// assert_eq!(concentration.value(), 4.0); // 200 mg in 50 mL
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drug {
    /// Dopamine, dosed by weight for shock and heart failure
    Dopamine,
    /// Dobutamine, inotropic support dosed by weight
    Dobutamine,
    /// Noradrenaline (norepinephrine), vasopressor dosed by weight or in mcg/min
    Noradrenaline,
    /// Octreotide, dosed hourly for gastrointestinal bleeding
    Octreotide,
}

impl Drug {
    /// All catalog entries, in display order
    pub fn all() -> [Drug; 4] {
        [
            Drug::Dopamine,
            Drug::Dobutamine,
            Drug::Noradrenaline,
            Drug::Octreotide,
        ]
    }

    /// Human-readable drug name
    pub fn name(&self) -> &'static str {
        match self {
            Drug::Dopamine => "Dopamine",
            Drug::Dobutamine => "Dobutamine",
            Drug::Noradrenaline => "Noradrenaline",
            Drug::Octreotide => "Octreotide",
        }
    }

    /// Mass unit the drug amount is labelled in
    pub fn mass_unit(&self) -> MassUnit {
        match self {
            Drug::Dopamine | Drug::Dobutamine | Drug::Noradrenaline => MassUnit::Milligram,
            Drug::Octreotide => MassUnit::Microgram,
        }
    }

    /// Dose units this drug is prescribed in, primary unit first
    pub fn dose_units(&self) -> &'static [DoseUnit] {
        match self {
            Drug::Dopamine | Drug::Dobutamine | Drug::Noradrenaline => {
                &[DoseUnit::McgPerKgMin, DoseUnit::McgPerMin]
            }
            Drug::Octreotide => &[DoseUnit::McgPerHour],
        }
    }

    /// Default solution preparation for this drug
    ///
    /// These reproduce the standard 50 mL syringe preparations: dopamine
    /// 200 mg in 20 mL plus 30 mL NS, dobutamine 250 mg in 20 mL plus
    /// 30 mL NS, noradrenaline 4 mg in 4 mL plus 46 mL NS, octreotide
    /// 500 mcg in 5 mL plus 45 mL NS.
    pub fn default_solution(&self) -> Solution {
        match self {
            Drug::Dopamine => Solution::new(200.0, MassUnit::Milligram, 20.0, 30.0),
            Drug::Dobutamine => Solution::new(250.0, MassUnit::Milligram, 20.0, 30.0),
            Drug::Noradrenaline => Solution::new(4.0, MassUnit::Milligram, 4.0, 46.0),
            Drug::Octreotide => Solution::new(500.0, MassUnit::Microgram, 5.0, 45.0),
        }
    }

    /// Clinical dose bands for this drug
    pub fn dose_bands(&self) -> Vec<DoseBand> {
        match self {
            Drug::Dopamine => vec![
                DoseBand::new("Low", DoseUnit::McgPerKgMin, 0.0, 3.0),
                DoseBand::new("Moderate", DoseUnit::McgPerKgMin, 3.0, 10.0),
                DoseBand::new("High", DoseUnit::McgPerKgMin, 10.0, 20.0),
            ],
            Drug::Dobutamine => vec![DoseBand::new("Usual", DoseUnit::McgPerKgMin, 2.5, 20.0)],
            Drug::Noradrenaline => vec![
                DoseBand::new("Weight-based", DoseUnit::McgPerKgMin, 0.0, 3.0),
                DoseBand::new("Non-weight-based", DoseUnit::McgPerMin, 0.0, 350.0),
            ],
            Drug::Octreotide => vec![DoseBand::new("Desired", DoseUnit::McgPerHour, 25.0, 50.0)],
        }
    }

    /// Check whether a dose falls inside any of this drug's bands
    ///
    /// Returns `None` when no band is expressed in the dose's unit, so a
    /// mismatched unit is never silently compared.
    pub fn is_dose_in_bands(&self, dose: &Dose) -> Option<bool> {
        let mut comparable = false;
        for band in self.dose_bands() {
            match band.covers(dose) {
                Some(true) => return Some(true),
                Some(false) => comparable = true,
                None => {}
            }
        }
        if comparable {
            Some(false)
        } else {
            None
        }
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A labelled clinical dose range
///
/// Bands mirror the intensity ranges a prescriber works with, e.g.
/// dopamine "Low" at 0–3 mcg/kg/min.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseBand {
    label: String,
    unit: DoseUnit,
    min: f64,
    max: f64,
}

impl DoseBand {
    pub(crate) fn new(label: &str, unit: DoseUnit, min: f64, max: f64) -> Self {
        DoseBand {
            label: label.to_string(),
            unit,
            min,
            max,
        }
    }

    /// Band label, e.g. "Low" or "Moderate"
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unit the band limits are expressed in
    pub fn unit(&self) -> DoseUnit {
        self.unit
    }

    /// Lower band limit, inclusive
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper band limit, inclusive
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether the dose lies inside the band
    ///
    /// Returns `None` when the dose is expressed in a different unit than
    /// the band, since the two cannot be compared.
    pub fn covers(&self, dose: &Dose) -> Option<bool> {
        if dose.unit() != self.unit {
            return None;
        }
        Some(dose.value() >= self.min && dose.value() <= self.max)
    }
}

impl fmt::Display for DoseBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}-{:.1} {}",
            self.label, self.min, self.max, self.unit
        )
    }
}
