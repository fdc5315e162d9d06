//! Bidirectional conversion between infusion pump rates and drug doses
//!
//! This module converts a pump rate in mL/hr to the dose it delivers and
//! back, for each dose unit in the catalog. It builds on the solution types
//! ([`crate::Solution`], [`crate::Concentration`]) for concentration
//! derivation and on [`crate::Patient`] for weight-based units.
//!
//! # Conversions
//!
//! | Dose unit | Rate to dose | Dose to rate |
//! |-----------|--------------|--------------|
//! | mcg/kg/min | rate × conc / (weight × 60) | dose × weight × 60 / conc |
//! | mcg/min | rate × conc / 60 | dose × 60 / conc |
//! | mcg/hr | rate × conc | dose / conc |
//!
//! Concentration is always in mcg/mL in these formulas. Every conversion
//! returns `Option`: `None` means the value is not computable from the
//! current inputs, which is different from a genuine zero dose.
//!
//! # Usage
//!
//! Conversions are reached from the types:
//! [`crate::Concentration::dose_at_rate`] for the forward direction and
//! [`Dose::required_rate`] for the inverse.
//!
//! ```rust
//! use infusol::prelude::*;
//!
//! let solution = Drug::Dopamine.default_solution();
//! let conc = solution.concentration().unwrap();
//! let patient = Patient::new(60.0);
//!
//! let dose = conc
//!     .dose_at_rate(5.0, DoseUnit::McgPerKgMin, &patient)
//!     .unwrap();
//! assert!((dose.value() - 5.5556).abs() < 1e-3);
//!
//! let rate = dose.required_rate(&conc, &patient).unwrap();
//! assert!((rate - 5.0).abs() < 1e-9);
//! ```

// Internal modules
mod calc;
mod types;

// Public API
pub use calc::{
    dose_per_hour_to_rate, dose_per_kg_to_rate, dose_per_min_to_rate, rate_to_dose_per_hour,
    rate_to_dose_per_kg, rate_to_dose_per_min,
};
pub use types::{Dose, DoseUnit};
